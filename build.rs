use anyhow::Result;
use vergen::EmitBuilder;

// Embeds VERGEN_GIT_SHA for `fdl_times --version`. Outside a git checkout
// vergen emits a placeholder value instead of failing the build.
fn main() -> Result<()> {
    EmitBuilder::builder().git_sha(true).emit()?;
    Ok(())
}
