mod command;
mod id;
mod parameter_change_request;

pub use command::Command;
pub use id::Id;
pub use parameter_change_request::CancelChangeRequest;
pub use parameter_change_request::ParameterChangeRequest;
