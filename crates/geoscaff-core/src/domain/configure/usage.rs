//! User-facing texts of the configure step.
//!
//! The usage page is shared verbatim between the emitted `configure.sh`
//! heredoc and the native `geoscaff configure --help`.

use crate::domain::{
    configure::matrix::BuildTree, error::DomainError, identity::ProjectIdentity,
    skeleton::Skeleton,
};

macro_rules! usage_page {
    () => {
        "NAME
    configure.sh
SYNOPSIS
    Prepares the build environment for {{PROJECT_NAME}}.

    - For Unix builds, the script creates 2 build trees for Debug and Release
    build in a 'build' sub directory under the project root.
USAGE
    configure.sh [options] [build-platform]
OPTIONS
    --help
        Prints this page.
    --help-platforms
        Lists the build platforms shipped with Geogram.
    --with-<key>=<value>
        Sets the CMake cache variable VORPALINE_WITH_<KEY> to <value>.
    --with-<key>
        Sets the CMake cache variable VORPALINE_WITH_<KEY> to TRUE.
    --build_name_suffix=suffix-dir
        Add a suffix to define the build directory
PLATFORM
    Build platforms supported by {{PROJECT_NAME}}: use configure.sh --help-platforms
"
    };
}

pub(crate) use usage_page;

/// The `--help` page, naming the project.
pub fn usage_text(identity: &ProjectIdentity) -> Result<String, DomainError> {
    Ok(Skeleton::parse(usage_page!())?.render(identity))
}

/// Closing message printed once every build tree has been configured.
///
/// Names the directories the trees were actually created in.
pub fn completion_text(identity: &ProjectIdentity, trees: &[BuildTree]) -> String {
    let dirs: Vec<String> = trees
        .iter()
        .map(|tree| tree.directory.display().to_string())
        .collect();

    format!(
        "To build {}:\n  \
         - go to {}\n  \
         - run 'make' or 'cmake --build .'\n\
         Note: local configuration can be specified in CMakeOptions.txt\n\
         (see CMakeOptions.txt.sample for an example)\n\
         You'll need to re-run configure.sh if you create or modify CMakeOptions.txt\n",
        identity.raw(),
        dirs.join(" or ")
    )
}
