pub mod allplay_scrape;
pub mod config;
pub mod feed;
pub mod html_render;
pub mod http_client;
pub mod league_scoring;
pub mod mfl_fetch;
pub mod normalize;
pub mod scoring_fetch;
pub mod sort;
pub mod state;
pub mod table;
pub mod text_table;
