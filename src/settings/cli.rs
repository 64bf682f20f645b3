//! Implementation of the `settings *` subcommands.

/// Implementation of `settings export`.
pub mod export {
    use std::time::Instant;

    use clap::Parser;

    use crate::app::{local::LocalData, App, Backend};
    use crate::common;
    use crate::settings::SETTINGS_EXPORT_FILENAME;

    /// Command line arguments for `settings export`.
    #[derive(Parser, Debug)]
    #[command(author, version, about = "Export the settings as a download artifact", long_about = None)]
    pub struct Args {
        /// Path to the data directory.
        #[arg(long, required = true)]
        pub path_data: String,
        /// Directory to write mitoSettings.json to.
        #[arg(long, required = true)]
        pub path_out: String,
    }

    /// Main entry point for `settings export`.
    pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
        let before_anything = Instant::now();
        tracing::info!("args_common = {:#?}", &args_common);
        tracing::info!("args = {:#?}", &args);

        let runtime = common::runtime()?;
        let backend = LocalData::new(&args.path_data);
        let mut app = App::new(backend.clone());
        app.state.settings = runtime.block_on(backend.load_settings())?;

        let path_out = std::path::Path::new(&args.path_out).join(SETTINGS_EXPORT_FILENAME);
        std::fs::write(&path_out, app.settings_json()?)
            .map_err(|e| anyhow::anyhow!("could not write {}: {}", path_out.display(), e))?;
        tracing::info!("wrote {}", path_out.display());

        tracing::info!(
            "All of `settings export` completed in {:?}",
            before_anything.elapsed()
        );
        Ok(())
    }
}

/// Implementation of `settings save-search`.
pub mod save_search {
    use std::time::Instant;

    use clap::Parser;

    use crate::app::{local::LocalData, Backend};
    use crate::common;
    use crate::query::load_filter_config;
    use crate::settings::VariantSearch;

    /// Command line arguments for `settings save-search`.
    #[derive(Parser, Debug)]
    #[command(author, version, about = "Create or update a saved search", long_about = None)]
    pub struct Args {
        /// Path to the data directory.
        #[arg(long, required = true)]
        pub path_data: String,
        /// Identifier of the sample to store the search for.
        #[arg(long, required = true)]
        pub sample: String,
        /// Name of the search; updates the custom search of that name if it
        /// exists.
        #[arg(long, required = true)]
        pub name: String,
        /// Description of the search.
        #[arg(long, default_value = "")]
        pub description: String,
        /// Filter configuration as JSON or @ with path to a JSON file.
        #[arg(long, required = true)]
        pub filter_config: String,
    }

    /// Main entry point for `settings save-search`.
    pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
        let before_anything = Instant::now();
        tracing::info!("args_common = {:#?}", &args_common);
        tracing::info!("args = {:#?}", &args);

        let runtime = common::runtime()?;
        let backend = LocalData::new(&args.path_data);
        let mut settings = runtime.block_on(backend.load_settings())?;

        let search = VariantSearch {
            name: args.name.clone(),
            description: args.description.clone(),
            custom: true,
            filter_config: Some(load_filter_config(&args.filter_config)?),
        };
        // strict validation at the CLI boundary; the store itself would
        // silently drop invalid candidates
        search.validate()?;

        let sample = settings
            .sample_mut(&args.sample)
            .ok_or_else(|| anyhow::anyhow!("no settings record for sample {:?}", args.sample))?;
        sample.upsert_search(&search);
        runtime.block_on(backend.save_settings(&settings))?;
        tracing::info!(
            "saved search {:?} for sample {:?}",
            args.name,
            args.sample
        );

        tracing::info!(
            "All of `settings save-search` completed in {:?}",
            before_anything.elapsed()
        );
        Ok(())
    }
}

/// Implementation of `settings delete-search`.
pub mod delete_search {
    use std::time::Instant;

    use clap::Parser;

    use crate::app::{local::LocalData, Backend};
    use crate::common;
    use crate::settings::VariantSearch;

    /// Command line arguments for `settings delete-search`.
    #[derive(Parser, Debug)]
    #[command(author, version, about = "Delete a saved search", long_about = None)]
    pub struct Args {
        /// Path to the data directory.
        #[arg(long, required = true)]
        pub path_data: String,
        /// Identifier of the sample holding the search.
        #[arg(long, required = true)]
        pub sample: String,
        /// Name of the search to delete; the built-in default cannot be
        /// deleted.
        #[arg(long, required = true)]
        pub name: String,
    }

    /// Main entry point for `settings delete-search`.
    pub fn run(args_common: &crate::common::Args, args: &Args) -> Result<(), anyhow::Error> {
        let before_anything = Instant::now();
        tracing::info!("args_common = {:#?}", &args_common);
        tracing::info!("args = {:#?}", &args);

        let runtime = common::runtime()?;
        let backend = LocalData::new(&args.path_data);
        let mut settings = runtime.block_on(backend.load_settings())?;

        let sample = settings
            .sample_mut(&args.sample)
            .ok_or_else(|| anyhow::anyhow!("no settings record for sample {:?}", args.sample))?;
        let candidate = VariantSearch {
            name: args.name.clone(),
            custom: true,
            ..Default::default()
        };
        if sample.delete_search(&candidate) {
            runtime.block_on(backend.save_settings(&settings))?;
            tracing::info!(
                "deleted search {:?} for sample {:?}",
                args.name,
                args.sample
            );
        } else {
            tracing::warn!(
                "no custom search {:?} for sample {:?}, nothing deleted",
                args.name,
                args.sample
            );
        }

        tracing::info!(
            "All of `settings delete-search` completed in {:?}",
            before_anything.elapsed()
        );
        Ok(())
    }
}
