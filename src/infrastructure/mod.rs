mod clock;
mod fs;
mod pem_decoder;
mod renderer;

pub use clock::{FixedClock, SystemClock};
pub use fs::FsBundleSource;
pub use pem_decoder::{parse_certificate, PemCertificateDecoder};
pub use renderer::TextRenderer;
