mod home;
pub use home::Home;

mod login;
pub use login::Login;

mod upload;
pub use upload::Upload;

mod results;
pub use results::Results;

mod shell;
pub use shell::Shell;

mod protected;
pub use protected::Protected;

mod not_found;
pub use not_found::NotFound;
