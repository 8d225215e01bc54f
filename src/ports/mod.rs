mod clock;
mod decoder;
mod renderer;
mod source;

pub use clock::Clock;
pub use decoder::CertificateDecoder;
pub use renderer::Renderer;
pub use source::BundleSource;
