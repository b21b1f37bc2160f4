use docker_ci_deploy::{
    errors::{CommandError, DeployError},
    sink::Sink,
    Credentials, Deployer, Docker, ImageTool, TagMap, TagPolicy,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Rename(String, String),
    Login(String, Option<String>),
    Push(String),
}

fn rename(source: &str, destination: &str) -> Call {
    Call::Rename(source.to_owned(), destination.to_owned())
}

fn push(reference: &str) -> Call {
    Call::Push(reference.to_owned())
}

#[derive(Debug, Default)]
struct Recorder {
    calls: Vec<Call>,
    fail_pushes: bool,
}

impl ImageTool for Recorder {
    fn rename(
        &mut self,
        _: &mut dyn Sink,
        source: &str,
        destination: &str,
    ) -> Result<(), CommandError> {
        self.calls.push(rename(source, destination));
        Ok(())
    }

    fn login(
        &mut self,
        _: &mut dyn Sink,
        credentials: &Credentials,
        registry: Option<&str>,
    ) -> Result<(), CommandError> {
        self.calls.push(Call::Login(
            credentials.username().to_owned(),
            registry.map(str::to_owned),
        ));
        Ok(())
    }

    fn push(&mut self, _: &mut dyn Sink, reference: &str) -> Result<(), CommandError> {
        self.calls.push(push(reference));
        if self.fail_pushes {
            Err(CommandError::Failed {
                command: format!("push {}", reference),
                code: Some(1),
                output: String::new(),
            })
        } else {
            Ok(())
        }
    }
}

fn recorded(
    images: &[&str],
    policy: TagPolicy,
    registry: Option<&str>,
    login: Option<&Credentials>,
) -> Vec<Call> {
    let mut deployer = Deployer::new(Recorder::default(), Vec::<String>::new());
    deployer.run(images, &policy, registry, login).unwrap();
    deployer.into_parts().0.calls
}

fn defaults() -> TagPolicy {
    TagPolicy::builder().build().unwrap()
}

fn dry_run(
    images: &[&str],
    policy: TagPolicy,
    registry: Option<&str>,
    login: Option<&str>,
) -> Vec<String> {
    let login: Option<Credentials> = login.map(|login| login.parse().unwrap());
    let mut deployer = Deployer::new(Docker::new().dry_run(true), Vec::<String>::new());
    deployer.run(images, &policy, registry, login.as_ref()).unwrap();
    deployer.into_parts().1
}

#[test]
fn registry_only() {
    assert_eq!(
        recorded(&["test-image:abc"], defaults(), Some("registry.example.com:5000"), None),
        vec![
            rename("test-image:abc", "registry.example.com:5000/test-image:abc"),
            push("registry.example.com:5000/test-image:abc"),
        ]
    );
}

#[test]
fn version_prefixes_existing_tag() {
    let policy = TagPolicy::builder().version("1.2.3").build().unwrap();
    assert_eq!(
        recorded(&["test-image:abc"], policy, None, None),
        vec![
            rename("test-image:abc", "test-image:1.2.3-abc"),
            push("test-image:1.2.3-abc"),
        ]
    );
}

#[test]
fn replacement_tags() {
    let policy = TagPolicy::builder().tags(vec!["abc", "def"]).build().unwrap();
    assert_eq!(
        recorded(&["test-image"], policy, None, None),
        vec![
            rename("test-image", "test-image:abc"),
            rename("test-image", "test-image:def"),
            push("test-image:abc"),
            push("test-image:def"),
        ]
    );
}

#[test]
fn no_rename_onto_itself() {
    assert_eq!(
        recorded(&["test-image", "test-image2"], defaults(), None, None),
        vec![push("test-image"), push("test-image2")]
    );
    let policy = TagPolicy::builder().version("1.2.3").build().unwrap();
    assert_eq!(
        recorded(&["test-image:1.2.3-abc"], policy, None, None),
        vec![push("test-image:1.2.3-abc")]
    );
}

#[test]
fn version_with_latest() {
    let policy = TagPolicy::builder().version("1.2.3").latest(true).build().unwrap();
    assert_eq!(
        recorded(&["test-image"], policy, None, None),
        vec![
            rename("test-image", "test-image:1.2.3"),
            rename("test-image", "test-image:latest"),
            push("test-image:1.2.3"),
            push("test-image:latest"),
        ]
    );
}

#[test]
fn all_options_multiple_images() {
    let policy = TagPolicy::builder()
        .tags(vec!["latest", "best"])
        .version("1.2.3")
        .build()
        .unwrap();
    let login = Credentials::new("janedoe", "pa55word");
    assert_eq!(
        recorded(
            &["test-image:tag", "test-image2:tag2"],
            policy,
            Some("registry.example.com:5000"),
            Some(&login)
        ),
        vec![
            rename("test-image:tag", "registry.example.com:5000/test-image:1.2.3"),
            rename("test-image:tag", "registry.example.com:5000/test-image:1.2.3-best"),
            rename("test-image2:tag2", "registry.example.com:5000/test-image2:1.2.3"),
            rename("test-image2:tag2", "registry.example.com:5000/test-image2:1.2.3-best"),
            Call::Login("janedoe".to_owned(), Some("registry.example.com:5000".to_owned())),
            push("registry.example.com:5000/test-image:1.2.3"),
            push("registry.example.com:5000/test-image:1.2.3-best"),
            push("registry.example.com:5000/test-image2:1.2.3"),
            push("registry.example.com:5000/test-image2:1.2.3-best"),
        ]
    );
}

#[test]
fn login_happens_once() {
    let login = Credentials::new("janedoe", "pa55word");
    let calls = recorded(&["a", "b", "c"], defaults(), None, Some(&login));
    assert_eq!(
        calls,
        vec![
            Call::Login("janedoe".to_owned(), None),
            push("a"),
            push("b"),
            push("c"),
        ]
    );
}

#[test]
fn duplicate_outputs_are_kept() {
    let policy = TagPolicy::builder().tags(vec!["abc", "abc"]).build().unwrap();
    assert_eq!(
        recorded(&["test-image"], policy, None, None),
        vec![
            rename("test-image", "test-image:abc"),
            rename("test-image", "test-image:abc"),
            push("test-image:abc"),
            push("test-image:abc"),
        ]
    );
}

#[test]
fn first_failure_stops() {
    let policy = TagPolicy::builder().tags(vec!["abc", "def"]).build().unwrap();
    let tool = Recorder {
        fail_pushes: true,
        ..Recorder::default()
    };
    let mut deployer = Deployer::new(tool, Vec::<String>::new());
    let err = deployer.run(&["test-image"], &policy, None, None).unwrap_err();
    assert!(matches!(err, DeployError::Command(CommandError::Failed { .. })));
    assert_eq!(deployer.tool().calls.last(), Some(&push("test-image:abc")));
    assert_eq!(deployer.tool().calls.len(), 3);
}

#[test]
fn unparsable_image_has_no_side_effects() {
    let mut deployer = Deployer::new(Recorder::default(), Vec::<String>::new());
    let err = deployer
        .run(&["good-image", "Bad-Image"], &defaults(), None, None)
        .unwrap_err();
    assert_eq!(err.to_string(), "Unable to parse image reference \"Bad-Image\"");
    assert!(deployer.tool().calls.is_empty());
}

#[test]
fn verbose_progress() {
    let policy = TagPolicy::builder().version("1.2.3").latest(true).build().unwrap();
    let login = Credentials::new("janedoe", "pa55word");
    let mut deployer = Deployer::new(Recorder::default(), Vec::<String>::new()).verbose(true);
    deployer
        .run(&["test-image:latest"], &policy, None, Some(&login))
        .unwrap();
    assert_eq!(
        deployer.sink(),
        &vec![
            "Tagging \"test-image:latest\" as \"test-image:1.2.3\"...",
            "Not tagging \"test-image:latest\" as itself",
            "Logging in as \"janedoe\"...",
            "Pushing tag \"test-image:1.2.3\"...",
            "Pushing tag \"test-image:latest\"...",
        ]
    );
}

#[test]
fn dry_run_commands() {
    let policy = TagPolicy::builder().tags(vec!["latest"]).build().unwrap();
    assert_eq!(
        dry_run(&["test-image:tag"], policy, None, None),
        vec![
            "docker tag test-image:tag test-image:latest",
            "docker push test-image:latest",
        ]
    );
}

#[test]
fn dry_run_hides_password() {
    let lines = dry_run(&["test-image"], defaults(), None, Some("janedoe:pa55word"));
    assert_eq!(
        lines,
        vec![
            "docker login --username janedoe --password <password>",
            "docker push test-image",
        ]
    );
}

#[test]
fn failed_login_hides_password() {
    let login = Credentials::new("janedoe", "pa55word");
    let mut deployer = Deployer::new(Docker::new().executable("false"), Vec::<String>::new());
    let err = deployer
        .run(&["test-image"], &defaults(), None, Some(&login))
        .unwrap_err();
    assert!(matches!(err, DeployError::Command(CommandError::Failed { .. })));
    assert!(!err.to_string().contains("pa55word"));
    assert!(!format!("{:?}", err).contains("pa55word"));
    assert!(err.to_string().contains("<password>"));
}

#[test]
fn tag_map_order() {
    let policy = TagPolicy::builder()
        .version("1.2.3")
        .semver(1, false)
        .build()
        .unwrap();
    let map = TagMap::build(&["foo:alpine", "bar"], &policy, Some("registry:5000")).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(
        map.outputs().collect::<Vec<_>>(),
        vec![
            "registry:5000/foo:1.2.3-alpine",
            "registry:5000/foo:1.2-alpine",
            "registry:5000/foo:1-alpine",
            "registry:5000/bar:1.2.3",
            "registry:5000/bar:1.2",
            "registry:5000/bar:1",
        ]
    );
    let sources: Vec<&str> = map.iter().map(|(source, _)| source).collect();
    assert_eq!(sources, vec!["foo:alpine", "bar"]);
}

#[test]
fn tag_map_replaces_registry() {
    let map = TagMap::build(
        &["registry:5000/foo:abc"],
        &defaults(),
        Some("registry2:5000"),
    )
    .unwrap();
    assert_eq!(map.outputs().collect::<Vec<_>>(), vec!["registry2:5000/foo:abc"]);
}

#[test]
fn invalid_registry_names_the_registry() {
    let mut deployer = Deployer::new(Recorder::default(), Vec::<String>::new());
    let err = deployer
        .run(&["test-image"], &defaults(), Some("not a registry"), None)
        .unwrap_err();
    assert!(matches!(err, DeployError::InvalidRegistry { .. }));
    assert_eq!(
        err.to_string(),
        "invalid registry \"not a registry\", expected <host>[:<port>]"
    );
    assert!(deployer.tool().calls.is_empty());
}
