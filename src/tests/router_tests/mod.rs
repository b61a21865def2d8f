mod health_tests;
mod house_avg_tests;
