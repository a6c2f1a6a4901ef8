//! Configure Service - the native counterpart of the emitted `configure.sh`.
//!
//! Workflow:
//! 1. Translate the raw tokens (help pages short-circuit here)
//! 2. Check the platform-options file written by `new`
//! 3. Put `ext/geogram/CMakeOptions.txt` in place unless the user supplied one
//! 4. Probe the build system
//! 5. Resolve the platform (explicit or detected)
//! 6. Run the generator once per build configuration

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildSystem, Filesystem, HostProbe},
    },
    domain::{
        DEPENDENCY_DIR, ProjectIdentity,
        configure::{
            BuildTree, ConfigureRequest, GeneratorInvocation, PLATFORMS_DIR, PlatformTag,
            ScanOutcome, detect, plan, supported_platforms, translate, usage_text,
        },
    },
    error::GeoscaffResult,
};

/// Default build root, relative to the project root.
pub const DEFAULT_BUILD_ROOT: &str = "build";

/// Name of the options file Geogram reads.
const OPTIONS_FILE: &str = "CMakeOptions.txt";

/// Where the platform options used for this run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OptionsSource {
    /// An existing `CMakeOptions.txt` was kept.
    UserSupplied,
    /// The project-specific file was copied into place.
    ProjectDefault,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum TreeStatus {
    Configured,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeOutcome {
    pub tree: BuildTree,
    #[serde(flatten)]
    pub status: TreeStatus,
}

/// Result of driving the whole build matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatrixReport {
    pub platform: PlatformTag,
    pub options_source: OptionsSource,
    pub request: ConfigureRequest,
    pub trees: Vec<TreeOutcome>,
}

impl MatrixReport {
    /// Trees whose generator run failed.
    pub fn failures(&self) -> impl Iterator<Item = &TreeOutcome> {
        self.trees
            .iter()
            .filter(|t| matches!(t.status, TreeStatus::Failed(_)))
    }

    pub fn is_success(&self) -> bool {
        self.failures().next().is_none()
    }
}

/// What a configure run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigureOutcome {
    /// `--help`: the usage page.
    Help(String),
    /// `--help-platforms`: supported platform names, sorted.
    Platforms(Vec<String>),
    Configured(MatrixReport),
}

pub struct ConfigureService {
    filesystem: Box<dyn Filesystem>,
    build_system: Box<dyn BuildSystem>,
    host: Box<dyn HostProbe>,
    build_root: PathBuf,
}

impl ConfigureService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        build_system: Box<dyn BuildSystem>,
        host: Box<dyn HostProbe>,
    ) -> Self {
        Self {
            filesystem,
            build_system,
            host,
            build_root: PathBuf::from(DEFAULT_BUILD_ROOT),
        }
    }

    /// Override the build root (relative paths resolve against the project root).
    pub fn with_build_root(mut self, build_root: impl Into<PathBuf>) -> Self {
        self.build_root = build_root.into();
        self
    }

    #[instrument(skip_all, fields(project = %identity, root = %root.display()))]
    pub fn run<I, S>(
        &self,
        identity: &ProjectIdentity,
        root: &Path,
        tokens: I,
    ) -> GeoscaffResult<ConfigureOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let request = match translate(tokens)? {
            ScanOutcome::Help => return Ok(ConfigureOutcome::Help(usage_text(identity)?)),
            ScanOutcome::HelpPlatforms => {
                return Ok(ConfigureOutcome::Platforms(self.platforms(root)));
            }
            ScanOutcome::Configure(request) => request,
        };

        if !request.ignored.is_empty() {
            warn!(ignored = ?request.ignored, "Ignoring arguments after the platform");
        }

        let options_source = self.ensure_options(identity, root)?;

        let banner = self.build_system.probe()?;
        debug!(%banner, "Build system found");

        let platform = self.resolve_platform(&request)?;
        info!(%platform, suffix = %request.suffix, "Configuring build matrix");

        let trees = self.drive_matrix(root, &platform, &request)?;

        Ok(ConfigureOutcome::Configured(MatrixReport {
            platform,
            options_source,
            request,
            trees,
        }))
    }

    /// Supported platform names found in the dependency tree.
    pub fn platforms(&self, root: &Path) -> Vec<String> {
        let dir = root.join(PLATFORMS_DIR);
        if !self.filesystem.is_dir(&dir) {
            return Vec::new();
        }
        match self.filesystem.list_dirs(&dir) {
            Ok(entries) => supported_platforms(entries),
            Err(e) => {
                warn!(error = %e, "Could not list platforms");
                Vec::new()
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_options(
        &self,
        identity: &ProjectIdentity,
        root: &Path,
    ) -> GeoscaffResult<OptionsSource> {
        let dependency = root.join(DEPENDENCY_DIR);
        let project_options = dependency.join(format!("{OPTIONS_FILE}.{}", identity.raw()));

        if !self.filesystem.exists(&project_options) {
            return Err(ApplicationError::MissingPlatformOptions {
                path: project_options,
            }
            .into());
        }

        let options = dependency.join(OPTIONS_FILE);
        if self.filesystem.exists(&options) {
            info!("Using user-supplied {OPTIONS_FILE}");
            Ok(OptionsSource::UserSupplied)
        } else {
            info!(project = identity.raw(), "Using project default {OPTIONS_FILE}");
            self.filesystem.copy_file(&project_options, &options)?;
            Ok(OptionsSource::ProjectDefault)
        }
    }

    fn resolve_platform(&self, request: &ConfigureRequest) -> GeoscaffResult<PlatformTag> {
        if let Some(explicit) = &request.platform_override {
            return Ok(PlatformTag::new(explicit.as_str()));
        }
        let identification = self.host.system_identification()?;
        debug!(%identification, "Detecting platform");
        Ok(detect(&identification)?.into())
    }

    fn drive_matrix(
        &self,
        root: &Path,
        platform: &PlatformTag,
        request: &ConfigureRequest,
    ) -> GeoscaffResult<Vec<TreeOutcome>> {
        let build_root = root.join(&self.build_root);
        let mut outcomes = Vec::new();

        for tree in plan(&build_root, platform, &request.suffix) {
            info!(tree = %tree.label(), "Creating makefiles");
            self.filesystem.create_dir_all(&tree.directory)?;

            let invocation = GeneratorInvocation {
                tree: &tree,
                assignments: &request.assignments,
                source_dir: root,
            };
            let status = match self.build_system.generate(&invocation) {
                Ok(()) => TreeStatus::Configured,
                Err(e) => {
                    warn!(tree = %tree.label(), error = %e, "Configuration failed; continuing");
                    TreeStatus::Failed(e.to_string())
                }
            };
            outcomes.push(TreeOutcome { tree, status });
        }

        Ok(outcomes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFilesystem, MockHostProbe};
    use crate::domain::ConfigureError;
    use crate::domain::configure::BuildConfiguration;
    use crate::error::GeoscaffError;
    use mockall::predicate::*;
    use std::sync::{Arc, Mutex};

    /// Records every invocation; fails the configurations listed in `fail`.
    #[derive(Default, Clone)]
    struct FakeBuildSystem {
        calls: Arc<Mutex<Vec<(BuildConfiguration, Vec<String>)>>>,
        fail: Vec<BuildConfiguration>,
        missing: bool,
    }

    impl BuildSystem for FakeBuildSystem {
        fn probe(&self) -> GeoscaffResult<String> {
            if self.missing {
                return Err(ApplicationError::GeneratorUnavailable {
                    program: "cmake".into(),
                    reason: "not found".into(),
                }
                .into());
            }
            Ok("cmake version 3.28.0".into())
        }

        fn generate(&self, invocation: &GeneratorInvocation<'_>) -> GeoscaffResult<()> {
            let config = invocation.tree.configuration;
            self.calls
                .lock()
                .unwrap()
                .push((config, invocation.arguments()));
            if self.fail.contains(&config) {
                return Err(ApplicationError::GeneratorFailed {
                    tree: invocation.tree.label(),
                    reason: "exit status 1".into(),
                }
                .into());
            }
            Ok(())
        }
    }

    fn ready_fs(user_options: bool) -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .with(eq(Path::new("/p/ext/geogram/CMakeOptions.txt.demo")))
            .return_const(true);
        fs.expect_exists()
            .with(eq(Path::new("/p/ext/geogram/CMakeOptions.txt")))
            .return_const(user_options);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    fn linux_host() -> MockHostProbe {
        let mut host = MockHostProbe::new();
        host.expect_system_identification()
            .returning(|| Ok("Linux box 6.1.0 #1 SMP x86_64 GNU/Linux".into()));
        host
    }

    fn service(fs: MockFilesystem, build: FakeBuildSystem, host: MockHostProbe) -> ConfigureService {
        ConfigureService::new(Box::new(fs), Box::new(build), Box::new(host))
    }

    fn report(outcome: ConfigureOutcome) -> MatrixReport {
        match outcome {
            ConfigureOutcome::Configured(report) => report,
            other => panic!("expected Configured, got {other:?}"),
        }
    }

    #[test]
    fn help_touches_nothing() {
        let fs = MockFilesystem::new();
        let outcome = service(fs, FakeBuildSystem::default(), MockHostProbe::new())
            .run(&ProjectIdentity::derive("demo"), Path::new("/p"), ["--help"])
            .unwrap();

        match outcome {
            ConfigureOutcome::Help(text) => assert!(text.contains("demo")),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn help_platforms_lists_without_sentinel() {
        let mut fs = MockFilesystem::new();
        fs.expect_is_dir().return_const(true);
        fs.expect_list_dirs()
            .with(eq(Path::new("/p/ext/geogram/cmake/platforms")))
            .returning(|_| {
                Ok(vec![
                    "xxx".into(),
                    "Linux64-gcc-dynamic".into(),
                    "Darwin-clang-dynamic".into(),
                ])
            });

        let outcome = service(fs, FakeBuildSystem::default(), MockHostProbe::new())
            .run(
                &ProjectIdentity::derive("demo"),
                Path::new("/p"),
                ["--with-gfx", "--help-platforms"],
            )
            .unwrap();

        assert_eq!(
            outcome,
            ConfigureOutcome::Platforms(vec![
                "Darwin-clang-dynamic".into(),
                "Linux64-gcc-dynamic".into(),
            ])
        );
    }

    #[test]
    fn unrecognized_option_fails_before_preconditions() {
        let fs = MockFilesystem::new();
        let err = service(fs, FakeBuildSystem::default(), MockHostProbe::new())
            .run(&ProjectIdentity::derive("demo"), Path::new("/p"), ["-x"])
            .unwrap_err();

        assert_eq!(
            err,
            GeoscaffError::Configure(ConfigureError::UnrecognizedOption { option: "-x".into() })
        );
    }

    #[test]
    fn missing_platform_options_is_fatal() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(false);
        fs.expect_create_dir_all().never();

        let err = service(fs, FakeBuildSystem::default(), MockHostProbe::new())
            .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
            .unwrap_err();

        assert!(matches!(
            err,
            GeoscaffError::Application(ApplicationError::MissingPlatformOptions { .. })
        ));
    }

    #[test]
    fn copies_project_options_when_absent() {
        let mut fs = ready_fs(false);
        fs.expect_copy_file()
            .with(
                eq(Path::new("/p/ext/geogram/CMakeOptions.txt.demo")),
                eq(Path::new("/p/ext/geogram/CMakeOptions.txt")),
            )
            .times(1)
            .returning(|_, _| Ok(()));

        let report = report(
            service(fs, FakeBuildSystem::default(), linux_host())
                .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
                .unwrap(),
        );

        assert_eq!(report.options_source, OptionsSource::ProjectDefault);
    }

    #[test]
    fn keeps_user_supplied_options() {
        let mut fs = ready_fs(true);
        fs.expect_copy_file().never();

        let report = report(
            service(fs, FakeBuildSystem::default(), linux_host())
                .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
                .unwrap(),
        );

        assert_eq!(report.options_source, OptionsSource::UserSupplied);
    }

    #[test]
    fn missing_cmake_aborts_before_the_matrix() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().never();
        let build = FakeBuildSystem {
            missing: true,
            ..Default::default()
        };

        let err = service(fs, build, linux_host())
            .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
            .unwrap_err();

        assert!(matches!(
            err,
            GeoscaffError::Application(ApplicationError::GeneratorUnavailable { .. })
        ));
    }

    #[test]
    fn detected_platform_drives_release_then_debug() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        let dirs = Arc::new(Mutex::new(Vec::new()));
        let seen = dirs.clone();
        fs.expect_create_dir_all().returning(move |p| {
            seen.lock().unwrap().push(p.to_path_buf());
            Ok(())
        });
        let build = FakeBuildSystem::default();
        let calls = build.calls.clone();

        let report = report(
            service(fs, build, linux_host())
                .run(
                    &ProjectIdentity::derive("demo"),
                    Path::new("/p"),
                    ["--with-gfx", "--build_name_suffix=-x"],
                )
                .unwrap(),
        );

        assert!(report.is_success());
        assert_eq!(report.platform.as_str(), "Linux64-gcc-dynamic");
        assert_eq!(
            *dirs.lock().unwrap(),
            vec![
                PathBuf::from("/p/build/Linux64-gcc-dynamic-Release-x"),
                PathBuf::from("/p/build/Linux64-gcc-dynamic-Debug-x"),
            ]
        );

        let calls = calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        let (config, args) = &calls[0];
        assert_eq!(*config, BuildConfiguration::Release);
        assert_eq!(
            args,
            &vec![
                "-DCMAKE_BUILD_TYPE:STRING=Debug".to_string(),
                "-DVORPALINE_WITH_GFX:BOOL=TRUE".to_string(),
                "-DCMAKE_BUILD_TYPE:STRING=Release".to_string(),
                "-DVORPALINE_PLATFORM:STRING=Linux64-gcc-dynamic".to_string(),
                "/p".to_string(),
            ]
        );
    }

    #[test]
    fn explicit_platform_skips_detection() {
        let fs = ready_fs(true);
        let mut host = MockHostProbe::new();
        host.expect_system_identification().never();

        let report = report(
            service(fs, FakeBuildSystem::default(), host)
                .run(
                    &ProjectIdentity::derive("demo"),
                    Path::new("/p"),
                    ["Custom-platform", "extra"],
                )
                .unwrap(),
        );

        assert_eq!(report.platform.as_str(), "Custom-platform");
        assert_eq!(report.request.ignored, vec!["extra".to_string()]);
    }

    #[test]
    fn unsupported_host_is_fatal() {
        let fs = ready_fs(true);
        let mut host = MockHostProbe::new();
        host.expect_system_identification()
            .returning(|| Ok("SunOS box 5.11 sparc".into()));

        let err = service(fs, FakeBuildSystem::default(), host)
            .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
            .unwrap_err();

        assert!(matches!(
            err,
            GeoscaffError::Configure(ConfigureError::UnsupportedOs { .. })
        ));
    }

    #[test]
    fn release_failure_still_attempts_debug() {
        let fs = ready_fs(true);
        let build = FakeBuildSystem {
            fail: vec![BuildConfiguration::Release],
            ..Default::default()
        };
        let calls = build.calls.clone();

        let report = report(
            service(fs, build, linux_host())
                .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
                .unwrap(),
        );

        assert_eq!(calls.lock().unwrap().len(), 2);
        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|t| t.tree.configuration).collect();
        assert_eq!(failed, vec![BuildConfiguration::Release]);
        assert_eq!(report.trees[1].status, TreeStatus::Configured);
    }

    #[test]
    fn directory_failure_aborts() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().return_const(true);
        fs.expect_create_dir_all().returning(|p| {
            Err(ApplicationError::FilesystemError {
                path: p.to_path_buf(),
                reason: "read-only".into(),
            }
            .into())
        });
        let build = FakeBuildSystem::default();
        let calls = build.calls.clone();

        let result = service(fs, build, linux_host()).run(
            &ProjectIdentity::derive("demo"),
            Path::new("/p"),
            Vec::<String>::new(),
        );

        assert!(result.is_err());
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn custom_build_root_is_honoured() {
        let fs = ready_fs(true);
        let report = report(
            service(fs, FakeBuildSystem::default(), linux_host())
                .with_build_root("out")
                .run(&ProjectIdentity::derive("demo"), Path::new("/p"), Vec::<String>::new())
                .unwrap(),
        );

        assert_eq!(
            report.trees[0].tree.directory,
            PathBuf::from("/p/out/Linux64-gcc-dynamic-Release")
        );
    }
}
