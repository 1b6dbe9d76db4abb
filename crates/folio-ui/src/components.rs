mod filter_buttons;
mod footer;
mod header;
mod project_card;
mod project_section;

pub use filter_buttons::FilterButtons;
pub use footer::Footer;
pub use header::Header;
pub use project_card::ProjectCard;
pub use project_section::ProjectSection;
