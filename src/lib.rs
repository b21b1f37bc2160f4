//! Retag container images built in CI and push them to a registry
//!
//! ```
//! # use docker_ci_deploy::{Deployer, Docker, TagPolicy};
//! let policy = TagPolicy::builder()
//!     .version("1.2.3")
//!     .latest(true)
//!     .build()
//!     .unwrap();
//! let mut deployer = Deployer::new(Docker::new().dry_run(true), Vec::<String>::new());
//! deployer.run(&["foo:alpine"], &policy, None, None).unwrap();
//! assert_eq!(
//!     deployer.sink(),
//!     &vec![
//!         "docker tag foo:alpine foo:1.2.3-alpine",
//!         "docker push foo:1.2.3-alpine",
//!         "docker push foo:alpine",
//!     ]
//! );
//! ```

#[macro_use] extern crate lazy_static;

pub mod command;
pub mod deploy;
pub mod docker;
pub mod errors;
pub mod image;
pub mod sink;
pub mod tagging;
pub mod vcs;

pub use crate::{
    deploy::{Deployer, TagMap},
    docker::{Credentials, Docker, ImageTool},
    image::Reference,
    tagging::TagPolicy,
};
