pub mod fade;

pub use fade::FadeEffect;
