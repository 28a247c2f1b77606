//! End-to-end tests: discover a project and resolve its configuration

use kiln_config::{
    DocumentOrigin, Error, MissingManifest, Project, ProjectOptions, ProfileSelection,
};
use kiln_test_utils::TestProject;
use std::fs;

mod discovery_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_discover_from_two_levels_down() {
        let project = TestProject::with_manifest("[profile.default]\nsrc = \"my_src\"\n");
        let nested = project.create_dir("a/b");

        let found = Project::discover(&nested).expect("Should find project root");

        assert_eq!(found.root().as_path(), project.canonical_root());
        assert_eq!(found.config().src(), "my_src");
        assert_eq!(found.config().out(), "out");
        assert_eq!(found.src_dir(), project.canonical_root().join("my_src"));
    }

    #[test]
    fn test_discover_without_manifest_is_missing_root() {
        let project = TestProject::new();
        let nested = project.create_dir("deep/er");

        // A kiln.toml above the temp directory would make this test meaningless
        if kiln_fs::RootLocator::new().locate(project.root()).is_some() {
            return;
        }

        let err = Project::discover(&nested).unwrap_err();
        assert!(err.is_missing_root(), "{err}");
    }

    #[test]
    fn test_discover_or_start_falls_back() {
        let project = TestProject::new();
        let nested = project.create_dir("standalone");

        if kiln_fs::RootLocator::new().locate(project.root()).is_some() {
            return;
        }

        let opened = Project::discover_or_start(&nested).unwrap();
        assert_eq!(opened.root().as_path(), dunce::canonicalize(&nested).unwrap());
        assert_eq!(opened.config().src(), "src");
    }
}

mod resolution_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_malformed_manifest_names_the_file() {
        let project = TestProject::with_manifest("[profile.default\nsrc = ");

        let err = Project::open(project.root()).unwrap_err();

        match &err {
            Error::Parse { origin, .. } => {
                assert_eq!(origin, &DocumentOrigin::File(project.canonical_root().join("kiln.toml")));
            }
            other => panic!("expected a parse error, got {other:?}"),
        }
        assert!(err.to_string().contains("kiln.toml"));
    }

    #[test]
    fn test_open_is_idempotent() {
        let project = TestProject::with_manifest(
            "[profile.default]\nsrc = \"contracts\"\nlibs = \"deps\"\nremappings = [\"a=b\", \"c=d\"]\n",
        );

        let first = Project::open(project.root()).unwrap();
        let second = Project::open(project.root()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.config().libs(), ["deps"]);
        assert_eq!(first.config().remappings(), ["a=b", "c=d"]);
    }

    #[test]
    fn test_each_open_rereads_the_manifest() {
        let project = TestProject::with_manifest("[profile.default]\nout = \"first\"\n");
        let before = Project::open(project.root()).unwrap();

        project.write_manifest("[profile.default]\nout = \"second\"\n");
        let after = Project::open(project.root()).unwrap();

        assert_eq!(before.config().out(), "first");
        assert_eq!(after.config().out(), "second");
    }

    #[test]
    fn test_missing_manifest_policy() {
        let project = TestProject::new();

        let lenient = Project::open(project.root()).unwrap();
        assert_eq!(lenient.config().src(), "src");
        assert_eq!(lenient.config().origin("src"), Some(&DocumentOrigin::Packaged));

        let strict = ProjectOptions::default().with_missing_manifest(MissingManifest::Error);
        let err = Project::open_with(project.root(), strict).unwrap_err();
        assert!(matches!(err, Error::ManifestNotFound { .. }));
    }

    #[test]
    fn test_named_profile_through_options() {
        let project = TestProject::with_manifest(
            "[profile.default]\nout = \"out\"\n\n[profile.release]\nout = \"release-out\"\n\n[profile.ci]\nout = \"ci-out\"\n",
        );

        let options = ProjectOptions::default().with_profile(ProfileSelection::named("release"));
        let release = Project::open_with(project.root(), options).unwrap();
        assert_eq!(release.config().out(), "release-out");

        let options = ProjectOptions::default().with_profile(ProfileSelection::named("staging"));
        let err = Project::open_with(project.root(), options).unwrap_err();
        assert!(matches!(err, Error::UnknownProfile { .. }));
    }

    #[test]
    fn test_env_references_are_expanded() {
        // PATH is set in every test environment
        let path = std::env::var("PATH").unwrap();
        let project = TestProject::with_manifest(
            "[profile.default]\nscript = \"${PATH}\"\nlibs = [\"$KILN_TEST_SURELY_UNSET_VAR/lib\"]\n",
        );

        let opened = Project::open(project.root()).unwrap();

        assert_eq!(opened.config().script(), path);
        assert_eq!(opened.config().libs(), ["$KILN_TEST_SURELY_UNSET_VAR/lib"]);
    }

    #[test]
    fn test_dot_env_variables_are_expanded() {
        let project = TestProject::with_manifest(
            "[profile.default]\nremappings = [\"@token/=${KILN_PROJECT_DOTENV_LIB}/token/\"]\n",
        );
        project.write_file(".env", "KILN_PROJECT_DOTENV_LIB=vendor\n");
        project.write_file("deploy.env", "KILN_PROJECT_DOTENV_LIB=deploy-vendor\n");

        let opened = Project::open(project.root()).unwrap();
        assert_eq!(opened.config().remappings(), ["@token/=vendor/token/"]);

        let options = ProjectOptions::default().with_dot_env("deploy.env");
        let opened = Project::open_with(project.root(), options).unwrap();
        assert_eq!(opened.config().remappings(), ["@token/=deploy-vendor/token/"]);

        fs::write(project.root().join(".env"), "BROKEN LINE\n").unwrap();
        let err = Project::open(project.root()).unwrap_err();
        assert!(matches!(err, Error::DotEnv { .. }));
    }

    #[test]
    fn test_defaults_from_file() {
        let project = TestProject::new();
        let defaults = project.write_file(
            "share/base_config.toml",
            "[profile.default]\nsrc = \"s\"\ntest = \"t\"\nscript = \"sc\"\nout = \"o\"\nlibs = []\nremappings = []\n",
        );

        let options = ProjectOptions::default().with_defaults_file(&defaults);
        let opened = Project::open_with(project.root(), options).unwrap();

        assert_eq!(opened.config().src(), "s");
        assert!(opened.config().libs().is_empty());
        assert_eq!(
            opened.config().origin("out"),
            Some(&DocumentOrigin::File(defaults.clone()))
        );

        fs::remove_file(&defaults).unwrap();
        let options = ProjectOptions::default().with_defaults_file(&defaults);
        let err = Project::open_with(project.root(), options).unwrap_err();
        assert!(matches!(err, Error::MissingBaseDefaults { .. }));
    }

    #[test]
    fn test_resolved_config_serializes_to_json() {
        let project = TestProject::with_manifest("[profile.default]\nsrc = \"contracts\"\nsolc = \"0.8.26\"\n");
        let opened = Project::open(project.root()).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&opened.config().to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["src"], "contracts");
        assert_eq!(json["solc"], "0.8.26");
    }
}
