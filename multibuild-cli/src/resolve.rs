//! Turns command-line flags and menu answers into the run's
//! [`ProcessOptions`] and the repositories to act on.

use thiserror::Error;

use multibuild_core::{BranchName, ProcessOptions, Repository, RepositoryError, Settings};

use crate::menu::{Interaction, Menu, PromptError};

const SELECT_REPOSITORIES: &str =
    "Select the repositories to process. You can select more than one option adding spaces between them:";
const ASK_RESET: &str =
    "Do you want to reset your repositories branch, using \"git reset --hard <branch>\"?";
const ASK_UPDATE: &str = "Do you want to update all your repositories branch, using \"git pull\"?";
const ASK_BUILD_ALL: &str =
    "Do you want to build all your repositories or just the ones that have been updated?";
const ASK_BUILD_COMMAND: &str = "Which Maven command should be used in the build process?";

/// The flag-level choices, before any question is asked.
#[derive(Debug, Clone, Default)]
pub struct FlagChoices {
    pub build_full: bool,
    pub clean_cache: bool,
    pub skip_menu: bool,
    /// Branch used when no menu is shown.
    pub branch: BranchName,
    /// Catalog key that pre-empts the build command question.
    pub command: Option<u8>,
}

#[derive(Debug)]
pub struct Resolved {
    pub options: ProcessOptions,
    pub repositories: Vec<Repository>,
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Prompt(#[from] PromptError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Combine `flags` with menu answers.
///
/// With `skip_menu` nothing is asked: every repository is updated and built
/// with the default command on `flags.branch`. Otherwise the user picks the
/// repositories, reset, update, build-all (only when updating), the branch,
/// and the build command (unless `build_full` or `flags.command` settle it).
pub fn resolve<I: Interaction>(
    flags: &FlagChoices,
    settings: &Settings,
    mut repositories: Vec<Repository>,
    menu: &mut Menu<I>,
) -> Result<Resolved, ResolveError> {
    for o in &settings.overrides {
        settings.catalog.resolve(o.key)?;
    }
    if let Some(key) = flags.command {
        settings.catalog.resolve(key)?;
    }

    let mut options = ProcessOptions {
        build_full: flags.build_full || flags.skip_menu,
        clean_cache: flags.clean_cache,
        skip_menu: flags.skip_menu,
        branch: flags.branch.clone(),
        ..Default::default()
    };

    if flags.skip_menu {
        options.update = true;
    } else {
        menu.header();
        repositories = select_repositories(menu, repositories)?;
        options.reset = menu.confirm(ASK_RESET)?;
        options.update = menu.confirm(ASK_UPDATE)?;
        if options.update {
            options.build_all =
                menu.choose_one(ASK_BUILD_ALL, &[(1, "All."), (2, "Just the updated.")])? == 1;
        }
        options.branch = menu.ask_branch()?;
    }

    let key = match flags.command {
        Some(key) => key,
        None if flags.build_full || flags.skip_menu => default_key(settings),
        None => choose_build_command(menu, settings)?,
    };
    assign_build_commands(settings, key, &mut repositories)?;

    Ok(Resolved {
        options,
        repositories,
    })
}

fn select_repositories<I: Interaction>(
    menu: &mut Menu<I>,
    repositories: Vec<Repository>,
) -> Result<Vec<Repository>, PromptError> {
    let labels: Vec<String> = repositories.iter().map(|r| r.label().to_string()).collect();
    let options: Vec<(usize, &str)> = labels
        .iter()
        .enumerate()
        .map(|(i, label)| (i + 1, label.as_str()))
        .collect();
    let picked = menu.choose_many(SELECT_REPOSITORIES, &options)?;

    Ok(repositories
        .into_iter()
        .enumerate()
        .filter(|(i, _)| picked.contains(&(i + 1)))
        .map(|(_, repo)| repo)
        .collect())
}

fn choose_build_command<I: Interaction>(
    menu: &mut Menu<I>,
    settings: &Settings,
) -> Result<u8, PromptError> {
    let options: Vec<(u8, &str)> = settings.catalog.iter().collect();
    menu.choose_one(ASK_BUILD_COMMAND, &options)
}

fn default_key(settings: &Settings) -> u8 {
    settings.catalog.keys().next().unwrap_or(1)
}

fn assign_build_commands(
    settings: &Settings,
    key: u8,
    repositories: &mut [Repository],
) -> Result<(), RepositoryError> {
    let chosen = settings.catalog.resolve(key)?;
    for repo in repositories.iter_mut() {
        let command = match settings.override_for(repo.label()) {
            Some(pinned) => {
                tracing::debug!(repository = repo.label(), key = pinned, "using pinned build command");
                settings.catalog.resolve(pinned)?
            }
            None => chosen,
        };
        repo.set_build_command(command, &settings.catalog)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use multibuild_core::{CommandOverride, BuildCommandCatalog};
    use tempfile::TempDir;

    use super::*;
    use crate::menu::testing::ScriptedInteraction;

    struct Fixture {
        _root: TempDir,
        settings: Settings,
        repos: Vec<Repository>,
    }

    fn fixture() -> Fixture {
        let root = TempDir::new().expect("root");
        let repos = ["proj.a", "proj.b", "proj.c"]
            .iter()
            .map(|name| {
                let dir = root.path().join(name);
                std::fs::create_dir(&dir).expect("mkdir");
                Repository::from_path(dir).expect("repo")
            })
            .collect();
        Fixture {
            settings: Settings::for_home(root.path()),
            _root: root,
            repos,
        }
    }

    fn labels(resolved: &Resolved) -> Vec<&str> {
        resolved.repositories.iter().map(|r| r.label()).collect()
    }

    fn commands<'a>(resolved: &'a Resolved, catalog: &'a BuildCommandCatalog) -> Vec<&'a str> {
        resolved
            .repositories
            .iter()
            .map(|r| r.build_command(catalog))
            .collect()
    }

    #[test]
    fn skip_menu_asks_nothing_and_updates_everything() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&[]));
        let flags = FlagChoices {
            skip_menu: true,
            ..Default::default()
        };

        let resolved = resolve(&flags, &fx.settings, fx.repos.clone(), &mut menu).expect("resolve");

        assert_eq!(menu.into_inner().asked, 0);
        assert!(resolved.options.update && resolved.options.should_force_build());
        assert!(resolved.options.build_full, "skipping the menu implies the full build");
        assert!(!resolved.options.reset);
        assert_eq!(labels(&resolved), ["A", "B", "C"]);
        assert!(commands(&resolved, &fx.settings.catalog)
            .iter()
            .all(|c| *c == "mvn clean install"));
    }

    #[test]
    fn full_menu_walkthrough() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&["3 1", "2", "1", "2", "develop", "4"]));

        let resolved =
            resolve(&FlagChoices::default(), &fx.settings, fx.repos.clone(), &mut menu)
                .expect("resolve");

        let opts = &resolved.options;
        assert!(!opts.reset && opts.update && !opts.build_all);
        assert_eq!(opts.branch.as_str(), "develop");
        assert_eq!(labels(&resolved), ["A", "C"]);
        let expected = fx.settings.catalog.get(4).expect("entry 4");
        assert_eq!(commands(&resolved, &fx.settings.catalog), [expected, expected]);
        assert_eq!(menu.into_inner().remaining(), 0);
    }

    #[test]
    fn build_all_is_not_asked_without_update() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&["2", "1", "2", "M", "1"]));

        let resolved =
            resolve(&FlagChoices::default(), &fx.settings, fx.repos.clone(), &mut menu)
                .expect("resolve");

        let opts = &resolved.options;
        assert!(opts.reset && !opts.update && !opts.build_all);
        assert_eq!(opts.branch.as_str(), "master");
        assert_eq!(labels(&resolved), ["B"]);
        assert_eq!(menu.into_inner().remaining(), 0);
    }

    #[test]
    fn build_full_skips_the_command_question() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&["1 2 3", "2", "2", "m", "5"]));
        let flags = FlagChoices {
            build_full: true,
            ..Default::default()
        };

        let resolved = resolve(&flags, &fx.settings, fx.repos.clone(), &mut menu).expect("resolve");

        assert_eq!(menu.into_inner().remaining(), 1, "command answer must stay unread");
        assert!(commands(&resolved, &fx.settings.catalog)
            .iter()
            .all(|c| *c == "mvn clean install"));
    }

    #[test]
    fn override_pins_one_repository() {
        let mut fx = fixture();
        fx.settings.overrides.push(CommandOverride {
            label: "B".into(),
            key: 1,
        });
        let flags = FlagChoices {
            skip_menu: true,
            command: Some(3),
            ..Default::default()
        };
        let mut menu = Menu::new(ScriptedInteraction::new(&[]));

        let resolved = resolve(&flags, &fx.settings, fx.repos.clone(), &mut menu).expect("resolve");

        let three = fx.settings.catalog.get(3).expect("entry 3");
        assert_eq!(
            commands(&resolved, &fx.settings.catalog),
            [three, "mvn clean install", three]
        );
    }

    #[test]
    fn unknown_override_key_is_rejected_before_prompting() {
        let mut fx = fixture();
        fx.settings.overrides.push(CommandOverride {
            label: "A".into(),
            key: 42,
        });
        let mut menu = Menu::new(ScriptedInteraction::new(&["1"]));

        let err = resolve(&FlagChoices::default(), &fx.settings, fx.repos.clone(), &mut menu)
            .unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Repository(RepositoryError::UnknownCatalogKey { key: 42, .. })
        ));
        assert_eq!(menu.into_inner().asked, 0);
    }

    #[test]
    fn unknown_command_flag_is_rejected_before_prompting() {
        let fx = fixture();
        let flags = FlagChoices {
            command: Some(9),
            ..Default::default()
        };
        let mut menu = Menu::new(ScriptedInteraction::new(&["1", "2", "2", "M"]));

        let err = resolve(&flags, &fx.settings, fx.repos.clone(), &mut menu).unwrap_err();

        assert!(matches!(
            err,
            ResolveError::Repository(RepositoryError::UnknownCatalogKey { key: 9, .. })
        ));
        let io = menu.into_inner();
        assert_eq!(io.asked, 0);
        assert!(io.shown.is_empty(), "no menu may be shown: {:?}", io.shown);
    }

    #[test]
    fn build_full_stays_off_in_menu_mode() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&["1", "2", "2", "M", "2"]));
        let resolved =
            resolve(&FlagChoices::default(), &fx.settings, fx.repos.clone(), &mut menu)
                .expect("resolve");
        assert!(!resolved.options.build_full);
    }

    #[test]
    fn eof_mid_menu_surfaces_as_prompt_error() {
        let fx = fixture();
        let mut menu = Menu::new(ScriptedInteraction::new(&["1"]));
        let err = resolve(&FlagChoices::default(), &fx.settings, fx.repos.clone(), &mut menu)
            .unwrap_err();
        assert!(matches!(err, ResolveError::Prompt(PromptError::Eof)));
    }
}
