use torrentbox::run;

fn main() -> anyhow::Result<()> {
    // The store is single-owner; one thread is all it ever needs.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run())
}
