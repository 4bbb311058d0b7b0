fn main() -> anyhow::Result<()> {
    dialogbuilder::cli::run_cli()
}
