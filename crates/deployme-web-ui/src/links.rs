//! Outbound links and static asset paths referenced by the pages.

/// Project repository.
pub const REPO_URL: &str = "https://github.com/qnbhd/deployme";

/// Project documentation.
pub const DOCS_URL: &str = REPO_URL;

/// Fork the project repository.
pub const FORK_URL: &str = "https://github.com/qnbhd/deployme/fork";

/// Hackathon the project was built at.
pub const HACKATHON_URL: &str = "https://ai.itmo.ru/dataproducthack";

/// Social preview image.
pub const PREVIEW_IMAGE: &str = "/imgs/ray/raycast-untitled.svg";

/// Pixel size of the social preview image.
pub const PREVIEW_IMAGE_WIDTH: u32 = 1920;
pub const PREVIEW_IMAGE_HEIGHT: u32 = 1080;

/// Sponsor band image.
pub const SPONSOR_IMAGE: &str = "/imgs/ai-product-hack/itmo.svg";

/// Static files the pages expect under the public directory.
pub const STATIC_ASSETS: [&str; 2] = [PREVIEW_IMAGE, SPONSOR_IMAGE];
