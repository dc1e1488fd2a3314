mod search_test;
mod sort_test;
