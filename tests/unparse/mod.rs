mod tests_round_trip;
