mod home;
mod not_found;
mod projects;
mod resume;

pub use home::HomePage;
pub use not_found::NotFoundPage;
pub use projects::ProjectsPage;
pub use resume::ResumePage;
