// build.rs

fn main() {
    // Generate build info for --version
    vergen::EmitBuilder::builder()
        .all_build()
        .emit()
        .expect("Unable to generate build info");
}
