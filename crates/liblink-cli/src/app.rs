//! The run pipeline: load config, resolve paths, decide on saving, validate,
//! then build / link / watch. Every fatal check happens before the first
//! external command is invoked.

use crate::prompt::{confirm, TermPrompt};
use crate::Cli;
use anyhow::Context;
use liblink_core::config::{ConfigStore, PersistedConfig};
use liblink_core::policy::{self, SaveDecision, SaveFlags};
use liblink_core::resolve::{
    self, NoPrompt, Prompt, ResolvedInputs, ResolvedPaths, DEFAULT_PACKAGE_NAME,
};
use liblink_core::runner::{self, PackageManager};
use liblink_core::sanitize::sanitize;
use liblink_core::LinkError;

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let interactive = !cli.non_interactive;

    let store = ConfigStore::open(cli.no_save).context("failed to locate config directory")?;
    let loaded = store.load();

    let inputs = resolve_inputs(cli, &loaded.record, interactive)?;

    maybe_save(cli, &store, &loaded.record, loaded.existed, &inputs, interactive)?;

    let paths = normalize_and_validate(cli, &inputs)?;

    if cli.debug_paths {
        println!("library path:    {}", paths.library_path.display());
        println!("infinity path:   {}", paths.infinity_path.display());
        for p in &paths.additional_paths {
            println!("additional path: {}", p.display());
        }
        println!("package name:    {}", paths.package_name);
        println!("config file:     {}", store.path().display());
    }

    run_phases(cli, &paths)
}

fn resolve_inputs(
    cli: &Cli,
    persisted: &PersistedConfig,
    interactive: bool,
) -> anyhow::Result<ResolvedInputs> {
    let mut term = TermPrompt;
    let mut none = NoPrompt;
    let prompt: &mut dyn Prompt = if interactive { &mut term } else { &mut none };

    let library_path = resolve::resolve_required(
        "library-path",
        "Library project path",
        cli.library_path.as_deref(),
        persisted.library_path.as_deref(),
        prompt,
    )?;
    let infinity_path = resolve::resolve_required(
        "infinity-path",
        "Infinity project path",
        cli.infinity_path.as_deref(),
        persisted.infinity_path.as_deref(),
        prompt,
    )?;
    let additional_raw = resolve::resolve_optional(
        "Additional SPA paths (comma or semicolon separated, empty for none)",
        cli.additional_spa_paths.as_deref(),
        persisted.additional_spa_paths.as_deref(),
        prompt,
    )?;
    let package_name = sanitize(cli.package_name.as_deref())
        .or_else(|| sanitize(persisted.package_name.as_deref()))
        .unwrap_or_else(|| DEFAULT_PACKAGE_NAME.to_string());

    Ok(ResolvedInputs {
        library_path,
        infinity_path,
        additional_raw,
        package_name,
    })
}

fn maybe_save(
    cli: &Cli,
    store: &ConfigStore,
    previous: &PersistedConfig,
    existed: bool,
    inputs: &ResolvedInputs,
    interactive: bool,
) -> anyhow::Result<()> {
    let flags = SaveFlags {
        force_save: cli.force_save,
        no_save: cli.no_save,
        interactive,
    };
    let changed = policy::changed(previous, inputs);
    let save = match policy::decide(existed, changed, flags) {
        SaveDecision::Save => true,
        SaveDecision::Skip => false,
        SaveDecision::Ask => confirm("Save these paths as your defaults?")?,
    };
    if save {
        store
            .save(PersistedConfig {
                library_path: Some(inputs.library_path.clone()),
                infinity_path: Some(inputs.infinity_path.clone()),
                additional_spa_paths: inputs.additional_raw.clone(),
                package_name: Some(inputs.package_name.clone()),
                updated: None,
            })
            .context("failed to write config file")?;
        println!("Saved defaults to {}", store.path().display());
    }
    Ok(())
}

fn normalize_and_validate(cli: &Cli, inputs: &ResolvedInputs) -> anyhow::Result<ResolvedPaths> {
    let library_path = resolve::normalize(&inputs.library_path);
    resolve::require_dir(&library_path).context("library path")?;

    let infinity_path = resolve::normalize(&inputs.infinity_path);
    resolve::require_dir(&infinity_path).context("infinity path")?;

    let tokens = resolve::split_additional(inputs.additional_raw.as_deref());
    let additional_paths = resolve::normalize_additional(&tokens, cli.skip_missing_paths)?;

    Ok(ResolvedPaths {
        library_path,
        infinity_path,
        additional_paths,
        package_name: inputs.package_name.clone(),
    })
}

fn run_phases(cli: &Cli, paths: &ResolvedPaths) -> anyhow::Result<()> {
    if cli.skip_build && cli.skip_link && cli.skip_watch {
        println!("All phases skipped; nothing to run.");
        return Ok(());
    }

    let pm = select_package_manager(cli)?;

    if cli.skip_build {
        println!("Skipping build.");
    } else {
        println!("Building library with {}...", pm.name());
        runner::run_step(pm.name(), &["run", "build"], &paths.library_path)?;
    }

    if cli.skip_link {
        println!("Skipping link.");
    } else {
        println!("Registering {} for linking...", paths.package_name);
        runner::run_step(pm.name(), &["link"], &paths.library_path)?;

        let mut consumers = vec![&paths.infinity_path];
        consumers.extend(paths.additional_paths.iter());
        for consumer in consumers {
            println!(
                "Linking {} into {}...",
                paths.package_name,
                consumer.display()
            );
            runner::run_step(pm.name(), &["link", &paths.package_name], consumer)?;
        }
    }

    if cli.skip_watch {
        println!("Skipping watch.");
    } else {
        let rendered =
            runner::spawn_detached(pm.name(), &["run", "watch"], &paths.library_path)?;
        println!(
            "Started detached watch process '{rendered}' in {}",
            paths.library_path.display()
        );
    }

    Ok(())
}

fn select_package_manager(cli: &Cli) -> anyhow::Result<PackageManager> {
    if let Some(name) = cli.package_manager.as_deref() {
        // clap restricts the value set, but keep the lookup total.
        return Ok(PackageManager::from_name(name).ok_or(LinkError::NoPackageManager)?);
    }
    Ok(runner::detect_package_manager().ok_or(LinkError::NoPackageManager)?)
}
