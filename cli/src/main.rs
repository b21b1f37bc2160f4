#[macro_use] extern crate clap;

use clap::{App, ArgMatches, ErrorKind};
use docker_ci_deploy::{
    errors::DeployError,
    sink::Stdout,
    vcs::{Git, GitSuffix},
    Credentials, Deployer, Docker, TagPolicy,
};
use env_logger::{from_env, Env};
use std::{error::Error, ffi::OsString, process};

/// Old option names, still accepted
const DEPRECATED_OPTIONS: &[(&str, &str)] = &[
    ("--tag-version", "--version"),
    ("--tag-latest", "--version-latest"),
    ("--tag-semver", "--version-semver"),
];

fn main() {
    let (args, deprecated) = translate_deprecated(std::env::args_os());

    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .get_matches_from_safe(args)
        .unwrap_or_else(|err| usage_error(err));

    let log_level = matches.value_of("log_level").unwrap();
    from_env(Env::default().default_filter_or(log_level)).init();

    for (old, new) in deprecated {
        log::warn!("the {} option is deprecated, use {} instead", old, new);
    }

    if let Err(err) = run(&matches) {
        report(&err, matches.is_present("debug"));
        process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<(), DeployError> {
    let images = string_values(matches, "image");
    let registry = matches.value_of("registry");
    let login = matches
        .value_of("login")
        .map(str::parse::<Credentials>)
        .transpose()?;
    let policy = tag_policy(matches)?;

    let docker = Docker::new()
        .executable(matches.value_of("executable").unwrap())
        .dry_run(matches.is_present("dry_run"));
    let mut deployer = Deployer::new(docker, Stdout).verbose(matches.is_present("verbose"));
    deployer.run(&images, &policy, registry, login.as_ref())?;
    Ok(())
}

fn tag_policy(matches: &ArgMatches) -> Result<TagPolicy, DeployError> {
    let mut policy = TagPolicy::builder()
        .tags(string_values(matches, "tag"))
        .latest(matches.is_present("version_latest"));

    if let Some(version) = matches.value_of("version") {
        policy = policy.version(version);
    }

    if matches.is_present("version_semver") {
        let precision = if matches.is_present("semver_precision") {
            value_t!(matches, "semver_precision", usize).unwrap_or_else(|err| usage_error(err))
        } else {
            1
        };
        policy = policy.semver(precision, matches.is_present("semver_zero"));
    }

    if let Some(suffix) = matches.value_of("suffix") {
        policy = policy.suffix(suffix);
    }

    if let Some(source) = matches.value_of("suffix_git") {
        let source: GitSuffix = source.parse().expect("checked by possible_values");
        let git = Git::new(matches.value_of("git").unwrap());
        policy = policy.suffix(git.suffix(source)?);
    }

    Ok(policy.build()?)
}

fn translate_deprecated<I>(args: I) -> (Vec<OsString>, Vec<(&'static str, &'static str)>)
where
    I: IntoIterator<Item = OsString>,
{
    let mut translated = Vec::new();
    let mut used = Vec::new();
    let mut options_ended = false;

    for arg in args {
        let replacement = match arg.to_str() {
            Some(_) if options_ended => None,
            Some("--") => {
                options_ended = true;
                None
            }
            Some(s) => DEPRECATED_OPTIONS.iter().find_map(|&(old, new)| {
                if s == old {
                    Some((old, new, new.to_owned()))
                } else {
                    s.strip_prefix(old)
                        .and_then(|rest| rest.strip_prefix('='))
                        .map(|value| (old, new, format!("{}={}", new, value)))
                }
            }),
            None => None,
        };
        match replacement {
            Some((old, new, arg)) => {
                used.push((old, new));
                translated.push(OsString::from(arg));
            }
            None => translated.push(arg),
        }
    }
    (translated, used)
}

fn usage_error(err: clap::Error) -> ! {
    match err.kind {
        ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => err.exit(),
        _ => {
            eprintln!("{}", err.message);
            process::exit(2);
        }
    }
}

fn report(err: &DeployError, debug: bool) {
    if debug {
        eprintln!("error: {:?}", err);
        let mut source = err.source();
        while let Some(cause) = source {
            eprintln!("caused by: {}", cause);
            source = cause.source();
        }
    } else {
        eprintln!("error: {}", err);
    }
}

fn string_values<S: AsRef<str>>(matches: &ArgMatches, name: S) -> Vec<String> {
    matches
        .values_of(name)
        .into_iter()
        .map(|values| values.map(|value| value.to_string()))
        .flatten()
        .collect()
}
