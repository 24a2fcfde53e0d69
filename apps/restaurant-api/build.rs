//! Build script for compiling Protocol Buffer definitions.
//!
//! Generated code goes to `$OUT_DIR` and is included via `tonic::include_proto!`.

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=../../proto/restaurant.proto");

    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(&["../../proto/restaurant.proto"], &["../../proto"])?;

    Ok(())
}
