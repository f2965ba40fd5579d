// Thu Aug 20 2026 - Alex

pub mod banner;

pub use banner::{Banner, BannerStyle};
