mod scrape_tests;
mod support;
