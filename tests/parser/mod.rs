mod tests_error_display;
mod tests_recovery;
mod tests_scanner;
mod tests_scenarios;
