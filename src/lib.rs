// userlens: search users, read their posts, count their commenters' words.
//
// This is the library root. Each module corresponds to one layer of the
// tool: fetching from the REST API, counting words, holding the view model,
// and printing it.

pub mod api;
pub mod config;
pub mod output;
pub mod state;
pub mod words;
