// REST API client — users, posts, and comments over plain HTTP GET.
//
// Each submodule handles one area of the API surface. The `source` module
// defines the trait the state layer depends on, so tests can swap the
// network out for an in-memory fake.

pub mod client;
pub mod models;
pub mod posts;
pub mod source;
pub mod users;
