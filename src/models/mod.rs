pub mod task;
pub mod user;

pub use task::{Task, TaskCreate, TaskStatus, TaskUpdate};
pub use user::{LoginRequest, SignupRequest, TokenResponse, User, UserSummary};
