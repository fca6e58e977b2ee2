//! One module per subcommand.

pub mod completions;
pub mod decrypt;
pub mod encrypt;
pub mod inspect;
pub mod pack;
pub mod unpack;
