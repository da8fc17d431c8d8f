//! Page components for the DeployMe landing site.
//!
//! Components render HTML through a shared [`Ui`] template engine. The [`PageShell`] wraps
//! every [`Page`] between the [`NavBar`] and the [`Footer`]; [`Theme`] supplies the color
//! tokens the utility classes are generated from.

pub mod footer;
pub mod highlight;
pub mod home;
pub mod html;
pub mod layout;
pub mod links;
pub mod navbar;
pub mod not_found;
pub mod shell;
pub mod site;
pub mod templates;
pub mod theme;

pub use footer::Footer;
pub use highlight::{Grammar, Highlighter};
pub use home::{CodeSample, HomePage};
pub use layout::{Layout, Size, SizeError};
pub use navbar::NavBar;
pub use not_found::NotFoundPage;
pub use shell::{Page, PageProps, PageShell, SiteMeta};
pub use site::Site;
pub use templates::{RenderError, Ui};
pub use theme::{Theme, ThemeError, Utility};
