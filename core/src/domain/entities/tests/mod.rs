mod otp_tests;
mod token_tests;
