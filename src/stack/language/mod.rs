mod elixir;
mod go;
mod java;
mod node;
mod php;
mod python;
mod ruby;
mod rust;

pub use elixir::ElixirDetector;
pub use go::GoDetector;
pub use java::JavaDetector;
pub use node::NodeDetector;
pub use php::PhpDetector;
pub use python::PythonDetector;
pub use ruby::RubyDetector;
pub use rust::RustDetector;
