mod html_parser_tests;
mod text_parser_tests;
