//! Integration tests for the shipit binary
//!
//! These run the compiled binary against throwaway git repositories. They
//! never require gh or network access: the gh-dependent stages are covered
//! by the mock-driven unit tests in `src/pipeline`.

mod helpers;
mod test_cli;
mod test_dry_run;
