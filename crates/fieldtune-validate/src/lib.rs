pub mod error;
pub mod matching;
pub mod mutator;
pub mod session;
pub mod validator;

pub use error::SessionError;
pub use matching::{match_against, match_candidate};
pub use mutator::apply;
pub use session::{AcceptBroken, Session, SessionState, integrity_check};
pub use validator::simulate;
