//! The fixed artifact blueprints.
//!
//! Each blueprint is a path skeleton plus a body skeleton. They share
//! nothing but the [`ProjectIdentity`] they are rendered with, which is what
//! keeps six separately written files consistent with each other.

use crate::domain::{
    artifact::{Artifact, ArtifactKind},
    common::{Permissions, RelativePath},
    configure::usage::usage_page,
    error::DomainError,
    identity::ProjectIdentity,
    skeleton::Skeleton,
};

/// Third-party dependency directory, relative to the project root.
pub const DEPENDENCY_DIR: &str = "ext/geogram";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blueprint {
    pub kind: ArtifactKind,
    pub path: Skeleton,
    pub body: Skeleton,
    pub permissions: Permissions,
}

impl Blueprint {
    pub fn for_kind(kind: ArtifactKind) -> Result<Self, DomainError> {
        let (path, body, permissions) = match kind {
            ArtifactKind::BuildRoot => (
                "cmake/{{PROJECT_NAME}}.cmake",
                BUILD_ROOT,
                Permissions::read_write(),
            ),
            ArtifactKind::BuildRootConfig => (
                "cmake/{{PROJECT_NAME}}_config.cmake",
                BUILD_ROOT_CONFIG,
                Permissions::read_write(),
            ),
            ArtifactKind::PlatformOptions => (
                "ext/geogram/CMakeOptions.txt.{{PROJECT_NAME}}",
                PLATFORM_OPTIONS,
                Permissions::read_write(),
            ),
            ArtifactKind::TopLevel => ("CMakeLists.txt", TOP_LEVEL, Permissions::read_write()),
            ArtifactKind::ConfigureScript => {
                ("configure.sh", CONFIGURE_SCRIPT, Permissions::executable())
            }
            ArtifactKind::AppStub => (
                "app/simple_mesh_app.cpp",
                APP_STUB,
                Permissions::read_write(),
            ),
        };

        Ok(Self {
            kind,
            path: Skeleton::parse(path)?,
            body: Skeleton::parse(body)?,
            permissions,
        })
    }

    /// Render this blueprint for one identity. Pure and deterministic.
    pub fn emit(&self, identity: &ProjectIdentity) -> Result<Artifact, DomainError> {
        Ok(Artifact {
            kind: self.kind,
            path: RelativePath::try_new(self.path.render(identity))?,
            content: self.body.render(identity),
            permissions: self.permissions,
        })
    }
}

/// Every blueprint, in emission order.
pub fn blueprints() -> Result<Vec<Blueprint>, DomainError> {
    ArtifactKind::ALL.into_iter().map(Blueprint::for_kind).collect()
}

/// Render every artifact for `identity`.
pub fn emit_all(identity: &ProjectIdentity) -> Result<Vec<Artifact>, DomainError> {
    blueprints()?.iter().map(|b| b.emit(identity)).collect()
}

// ── bodies ────────────────────────────────────────────────────────────────────

const BUILD_ROOT: &str = r"set({{PROJECT_NAME_UPPER}}_SOURCE_DIR ${CMAKE_SOURCE_DIR})
include(${{{PROJECT_NAME_UPPER}}_SOURCE_DIR}/cmake/{{PROJECT_NAME}}_config.cmake)
link_directories(${{{PROJECT_NAME_UPPER}}_SOURCE_DIR}/${RELATIVE_LIB_DIR})
";

const BUILD_ROOT_CONFIG: &str = r#"macro({{PROJECT_NAME}}_find_Python)
find_package(PythonLibs 3 QUIET)
if(NOT PYTHONLIBS_FOUND)
    message(
        STATUS
        "CMake did not find Python library,
            using default fallbacks (edit WHERE_IS... in CMakeGUI if need be)."
    )
    set(PYTHON_INCLUDE_DIRS ${WHERE_ARE_PYTHON_INCLUDES})
    set(PYTHON_LIBRARIES ${WHERE_IS_PYTHON_LIB})
endif()
if(
    NOT "${PYTHON_INCLUDE_DIRS}" STREQUAL "" AND
    NOT "${PYTHON_LIBRARIES}" STREQUAL ""
)
    set({{PROJECT_NAME_UPPER}}_FOUND_PYTHON TRUE)
endif()
endmacro()

if(IS_DIRECTORY ${CMAKE_SOURCE_DIR}/ext/geogram/)
set(
    GEOGRAM_SOURCE_DIR "${CMAKE_SOURCE_DIR}/ext/geogram/"
    CACHE PATH "full path to the Geogram installation"
)
set(USE_BUILTIN_GEOGRAM TRUE)
else()
message(
    SEND_ERROR
    "CMake did not find Geogram in ${CMAKE_SOURCE_DIR}/ext/geogram/"
    )
endif()
"#;

const PLATFORM_OPTIONS: &str = r"if(WIN32)
   set(VORPALINE_PLATFORM Win-vs-dynamic-generic)
elseif(APPLE)
   set(VORPALINE_PLATFORM Darwin-clang-dynamic)
elseif(UNIX)
   set(VORPALINE_PLATFORM Linux64-gcc-dynamic)
endif()

# Only geogram, geogram_gfx and GLFW will be built
# (skips generation of geogram demos and programs)
set(GEOGRAM_LIB_ONLY ON)
";

const TOP_LEVEL: &str = r#"cmake_minimum_required(VERSION 3.0)

project({{PROJECT_NAME}})

set(
  GEOGRAM_SOURCE_DIR "${CMAKE_SOURCE_DIR}/ext/geogram/"
  CACHE PATH "full path to the Geogram installation"
)

include(${CMAKE_SOURCE_DIR}/cmake/{{PROJECT_NAME}}.cmake)

file(GLOB SRCFILES src/*.cpp )
include_directories(include)

add_subdirectory(ext/geogram)

add_executable(simple_mesh_app ${SRCFILES} app/simple_mesh_app)
target_link_libraries(simple_mesh_app geogram geogram_gfx ${GLFW_LIBRARIES})
"#;

const APP_STUB: &str = r#"#include <iostream>
#include <geogram_gfx/gui/simple_mesh_application.h>

int main(int argc, char** argv) {

    GEO::SimpleMeshApplication app("simple_mesh_app");
    app.start(argc,argv);
    return 0;
}
"#;

// The option table, detection table and matrix loop below mirror
// `configure::options`, `configure::platform` and `configure::matrix`.
const CONFIGURE_SCRIPT: &str = concat!(
    r#"#!/bin/sh

# This file for Linux and macOS users,
# launches CMake and creates configuration for
# Release and Debug modes.

# Parse command line arguments

cmake_options=-DCMAKE_BUILD_TYPE:STRING=Debug
build_name_suffix=
while [ -n "$1" ]; do
    case "$1" in
        --with-*=*)
            key=`echo "$1" | sed 's/^--with-\([^=]*\)=.*$/\1/' | tr '[:lower:]' '[:upper:]'`
            value=`echo "$1" | sed 's/^--with-[^=]*=\(.*\)$/\1/'`
            cmake_options="$cmake_options -DVORPALINE_WITH_$key:STRING=$value"
            shift
            ;;
        --with-*)
            key=`echo "$1" | sed 's/^--with-\(.*\)$/\1/' | tr '[:lower:]' '[:upper:]'`
            cmake_options="$cmake_options -DVORPALINE_WITH_$key:BOOL=TRUE"
            shift
            ;;
        --help-platforms)
            echo "Supported platforms:"
            for i in `find ext/geogram/cmake/platforms/* -maxdepth 0 -type d | sort`
            do
                if [ `basename $i` != "xxx" ]
                then
                    echo "*" `basename $i`
                fi
            done
            exit 0
            ;;
        --build_name_suffix=*)
            build_name_suffix=`echo "$1" | sed 's/^--build_name_suffix=\(.*\)$/\1/'`
            shift
            ;;
        --help)
            cat <<END
"#,
    usage_page!(),
    r#"END
            exit 0
            ;;
        -*)
            echo "Error: unrecognized option: $1"
            exit 1
            ;;
        *)
            break
            ;;
    esac
done

# Check for the presence of geogram

if [ ! -f ext/geogram/CMakeOptions.txt.{{PROJECT_NAME}} ]; then
   echo "geogram is missing, you need to install it as well with:"
   echo "git clone https://github.com/BrunoLevy/geogram.git ext/geogram"
   echo "then re-run the {{PROJECT_NAME}} generator"
   exit 1
fi

if [ -f ext/geogram/CMakeOptions.txt ]; then
   echo "Using user-supplied CMakeOptions.txt in geogram"
else
   echo "Using {{PROJECT_NAME}} default CMakeOptions.txt in geogram"
   cp ext/geogram/CMakeOptions.txt.{{PROJECT_NAME}} ext/geogram/CMakeOptions.txt
fi

echo
echo ============= Checking for CMake ============
echo

if (cmake --version); then
    echo "Found CMake"
    echo
else
    echo "Error: CMake not found, please install it (see http://www.cmake.org/)"
    exit 1
fi

# Check the current OS

os="$1"
if [ -z "$os" ]; then
    os=`uname -a`
    case "$os" in
        *Linux*x86_64*|*Linux*amd64*)
            os=Linux64-gcc-dynamic
            ;;
        *Linux*i586*|*Linux*i686*)
            os=Linux32-gcc-dynamic
            ;;
        *Darwin*)
            os=Darwin-clang-dynamic
            ;;
        *)
            echo "Error: OS not supported: $os"
            exit 1
            ;;
    esac
fi

# Generate the Makefiles
# A failed configuration does not stop the next one.

failed=
for config in Release Debug; do
   platform=$os-$config
   echo
   echo ============= Creating makefiles for $platform ============
   echo

   build_dir=build/$platform$build_name_suffix
   mkdir -p $build_dir || exit 1
   (cd $build_dir;
    cmake \
        $cmake_options \
        -DCMAKE_BUILD_TYPE:STRING=$config \
        -DVORPALINE_PLATFORM:STRING=$os \
    ../../) || failed="$failed $platform"
done

if [ -n "$failed" ]; then
    echo
    echo "Error: CMake failed for:$failed"
    exit 1
fi

echo
echo ============== {{PROJECT_NAME}} build configured ==================
echo

cat << EOF
To build {{PROJECT_NAME}}:
  - go to build/$os-Release$build_name_suffix or build/$os-Debug$build_name_suffix
  - run 'make' or 'cmake --build .'
Note: local configuration can be specified in CMakeOptions.txt
(see CMakeOptions.txt.sample for an example)
You'll need to re-run configure.sh if you create or modify CMakeOptions.txt
EOF
"#
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::configure::{
        BuildConfiguration, DETECTION_RULES, OPTION_PREFIX, PLATFORM_SENTINEL, PLATFORMS_DIR,
        matrix::PLATFORM_VARIABLE, usage_text,
    };

    fn artifacts_for(name: &str) -> Vec<Artifact> {
        emit_all(&ProjectIdentity::derive(name)).unwrap()
    }

    fn content(artifacts: &[Artifact], kind: ArtifactKind) -> &str {
        &artifacts.iter().find(|a| a.kind == kind).unwrap().content
    }

    #[test]
    fn every_blueprint_parses() {
        assert_eq!(blueprints().unwrap().len(), ArtifactKind::ALL.len());
    }

    #[test]
    fn paths_follow_the_project_name() {
        let paths: Vec<String> = artifacts_for("polycube")
            .iter()
            .map(|a| a.path.to_string())
            .collect();
        assert_eq!(
            paths,
            vec![
                "cmake/polycube.cmake",
                "cmake/polycube_config.cmake",
                "ext/geogram/CMakeOptions.txt.polycube",
                "CMakeLists.txt",
                "configure.sh",
                "app/simple_mesh_app.cpp",
            ]
        );
    }

    #[test]
    fn emission_is_deterministic() {
        assert_eq!(artifacts_for("Remesh"), artifacts_for("Remesh"));
    }

    #[test]
    fn identifiers_never_drift() {
        // "MeshLab2" has distinct raw, upper and lower forms.
        let artifacts = artifacts_for("MeshLab2");
        for artifact in &artifacts {
            assert!(!artifact.content.contains("meshlab2"), "{}", artifact.kind);
            assert!(!artifact.content.contains("{{"), "{}", artifact.kind);
        }
        let root = content(&artifacts, ArtifactKind::BuildRoot);
        assert!(root.contains("set(MESHLAB2_SOURCE_DIR ${CMAKE_SOURCE_DIR})"));
        assert!(root.contains("include(${MESHLAB2_SOURCE_DIR}/cmake/MeshLab2_config.cmake)"));
        assert!(
            content(&artifacts, ArtifactKind::BuildRootConfig)
                .contains("set(MESHLAB2_FOUND_PYTHON TRUE)")
        );
        assert!(content(&artifacts, ArtifactKind::TopLevel).contains("project(MeshLab2)"));
        assert!(
            content(&artifacts, ArtifactKind::TopLevel)
                .contains("include(${CMAKE_SOURCE_DIR}/cmake/MeshLab2.cmake)")
        );
    }

    #[test]
    fn cross_references_resolve_to_emitted_paths() {
        let artifacts = artifacts_for("demo");
        let paths: Vec<String> = artifacts.iter().map(|a| a.path.to_string()).collect();
        assert!(content(&artifacts, ArtifactKind::TopLevel).contains(&paths[0]));
        assert!(content(&artifacts, ArtifactKind::BuildRoot).contains(&paths[1]));
        assert!(content(&artifacts, ArtifactKind::ConfigureScript).contains(&paths[2]));
    }

    #[test]
    fn platform_options_live_under_dependency_dir() {
        for artifact in artifacts_for("demo") {
            assert_eq!(
                artifact.path.as_path().starts_with(DEPENDENCY_DIR),
                artifact.kind.requires_dependency()
            );
        }
    }

    #[test]
    fn only_configure_script_is_executable() {
        for artifact in artifacts_for("demo") {
            assert_eq!(
                artifact.permissions.executable_flag(),
                artifact.kind == ArtifactKind::ConfigureScript
            );
        }
    }

    #[test]
    fn configure_script_mirrors_native_tables() {
        let artifacts = artifacts_for("demo");
        let script = content(&artifacts, ArtifactKind::ConfigureScript);

        assert!(script.starts_with("#!/bin/sh\n"));
        assert!(script.contains(&format!("-D{OPTION_PREFIX}$key:STRING=$value")));
        assert!(script.contains(&format!("-D{OPTION_PREFIX}$key:BOOL=TRUE")));
        assert!(script.contains(PLATFORMS_DIR));
        assert!(script.contains(&format!("!= \"{PLATFORM_SENTINEL}\"")));
        assert!(script.contains(&format!("-D{PLATFORM_VARIABLE}:STRING=$os")));
        for rule in DETECTION_RULES {
            assert!(script.contains(rule.kernel));
            assert!(script.contains(&format!("os={}", rule.platform)));
            for arch in rule.any_of {
                assert!(script.contains(arch));
            }
        }
        let configs: Vec<_> = BuildConfiguration::ALL.iter().map(|c| c.as_str()).collect();
        assert!(script.contains(&format!("for config in {}; do", configs.join(" "))));
    }

    #[test]
    fn configure_script_embeds_usage_page() {
        let id = ProjectIdentity::derive("demo");
        let artifacts = emit_all(&id).unwrap();
        let script = content(&artifacts, ArtifactKind::ConfigureScript);
        assert!(script.contains(&format!("cat <<END\n{}END\n", usage_text(&id).unwrap())));
    }
}
