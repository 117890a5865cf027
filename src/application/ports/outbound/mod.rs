//! Outbound ports - Interfaces that the application requires from external systems

mod renderer_port;
mod repository_port;

pub use renderer_port::MapRendererPort;
pub use repository_port::CardRepositoryPort;
