use std::cmp;
use std::collections::BTreeSet;
use std::ffi::CStr;
use std::os::raw::c_char;

use gl::types::*;

use crate::errors::*;
use crate::layer::Dispatch;

// Enums of compatibility and embedded profiles, missing from the core bindings.
const MAX_ATTRIB_STACK_DEPTH: GLenum = 0x0D35;
const MAX_CLIENT_ATTRIB_STACK_DEPTH: GLenum = 0x0D3B;
const MAX_TEXTURE_UNITS: GLenum = 0x84E2;
const MAX_TEXTURE_COORDS: GLenum = 0x8871;
const MAX_VARYING_FLOATS: GLenum = 0x8B4B;
const MAX_VARYING_VECTORS: GLenum = 0x8DFC;
const MAX_VIEWPORTS: GLenum = 0x825B;
const MAX_VERTEX_ATTRIB_BINDINGS: GLenum = 0x82DA;
const MAX_DEBUG_MESSAGE_LENGTH: GLenum = 0x9143;

/// Describes the OpenGL context profile.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Profile {
    /// The context uses only future-compatible functions and definitions.
    Core,
    /// The context includes all immediate mode functions and definitions.
    Compatibility,
}

/// Describes a version.
///
/// A version can only be compared to another version if they belong to the same API.
/// For example, both `Version::GL(3, 0) >= Version::ES(3, 0)` and `Version::ES(3, 0) >=
/// Version::GL(3, 0)` return `false`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Version {
    /// Regular OpenGL.
    GL(u8, u8),
    /// OpenGL embedded system.
    ES(u8, u8),
}

impl PartialOrd for Version {
    #[inline]
    fn partial_cmp(&self, other: &Version) -> Option<cmp::Ordering> {
        let (es1, major1, minor1) = match *self {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        let (es2, major2, minor2) = match *other {
            Version::GL(major, minor) => (false, major, minor),
            Version::ES(major, minor) => (true, major, minor),
        };

        if es1 != es2 {
            None
        } else {
            Some((major1, minor1).cmp(&(major2, minor2)))
        }
    }
}

impl Version {
    /// Parses the string returned by `glGetString(GL_VERSION)`.
    ///
    /// Desktop drivers report `<major>.<minor>[.<release>] [vendor info]`, embedded
    /// ones prefix it with `OpenGL ES ` or, for 1.x profiles, `OpenGL ES-CM ` and
    /// `OpenGL ES-CL `.
    pub fn parse(desc: &str) -> Result<Version> {
        let malformed = || Error::Driver(format!("Version string '{}' is malformed.", desc));

        let (es, numbers) = if desc.starts_with("OpenGL ES-") {
            (true, desc.get(13..).unwrap_or(""))
        } else if desc.starts_with("OpenGL ES ") {
            (true, &desc[10..])
        } else {
            (false, desc)
        };

        let numbers = numbers.split(' ').next().ok_or_else(malformed)?;
        let mut iter = numbers.split('.');

        let major = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        let minor = iter
            .next()
            .and_then(|v| v.parse().ok())
            .ok_or_else(malformed)?;

        if es {
            Ok(Version::ES(major, minor))
        } else {
            Ok(Version::GL(major, minor))
        }
    }
}

/// Represents the capabilities of the driver behind a context.
///
/// Contrary to the state, these values never change.
#[derive(Debug, Clone)]
pub struct ContextInfo {
    /// The version of the API exposed by the driver.
    pub version: Version,

    /// The company responsible for this GL implementation.
    pub vendor: String,

    /// The name of the renderer. This name is typically specific to a particular
    /// configuration of a hardware platform.
    pub renderer: String,

    /// The OpenGL context profile if available.
    ///
    /// The context profile is available from OpenGL 3.2 onwards. `None` if not supported.
    pub profile: Option<Profile>,

    /// The list of OpenGL extensions support by this implementation.
    pub extensions: BTreeSet<String>,

    /// The implementation limits.
    pub limits: Limits,
}

/// Implementation limits of a context.
///
/// A limit the profile does not define reads as 0.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Limits {
    pub max_attrib_stack_depth: u32,
    pub max_client_attrib_stack_depth: u32,
    pub max_combined_texture_image_units: u32,
    /// Defaults to 1024 without any of the debug output extensions.
    pub max_debug_message_length: u32,
    pub max_draw_buffers: u32,
    pub max_texture_coords: u32,
    pub max_texture_units: u32,
    pub max_vertex_attrib_bindings: u32,
    /// Fixed to 8 on OpenGL ES 1.x.
    pub max_vertex_attribs: u32,
    pub max_viewports: u32,
    /// Read from `GL_MAX_VARYING_VECTORS` as vectors on ES 2.0+ and core profiles.
    pub max_varying_floats: u32,
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_attrib_stack_depth: 0,
            max_client_attrib_stack_depth: 0,
            max_combined_texture_image_units: 0,
            max_debug_message_length: 1024,
            max_draw_buffers: 0,
            max_texture_coords: 0,
            max_texture_units: 0,
            max_vertex_attrib_bindings: 0,
            max_vertex_attribs: 0,
            max_viewports: 0,
            max_varying_floats: 0,
        }
    }
}

impl Limits {
    unsafe fn query(gl: &Dispatch, info: &ContextInfo) -> Limits {
        let get = |pname: GLenum| {
            let mut val = 0;
            gl.glGetIntegerv(pname, &mut val);
            val.max(0) as u32
        };

        let es1 = info.is_es1();
        let es2 = info.is_es2();
        let core = info.is_core();
        let compat = info.is_compatibility();

        let mut limits = Limits::default();

        if compat {
            limits.max_attrib_stack_depth = get(MAX_ATTRIB_STACK_DEPTH);
            limits.max_client_attrib_stack_depth = get(MAX_CLIENT_ATTRIB_STACK_DEPTH);
            limits.max_texture_coords = get(MAX_TEXTURE_COORDS);
        }

        if !es1 {
            limits.max_combined_texture_image_units = get(gl::MAX_COMBINED_TEXTURE_IMAGE_UNITS);
        }

        if core || compat {
            limits.max_draw_buffers = get(gl::MAX_DRAW_BUFFERS);

            if info.version >= Version::GL(4, 3) || info.has_extension("GL_ARB_vertex_attrib_binding") {
                limits.max_vertex_attrib_bindings = get(MAX_VERTEX_ATTRIB_BINDINGS);
            }

            if info.version >= Version::GL(4, 1) || info.has_extension("GL_ARB_viewport_array") {
                limits.max_viewports = get(MAX_VIEWPORTS);
            }
        }

        if es1 || compat {
            limits.max_texture_units = get(MAX_TEXTURE_UNITS);
        }

        if es2 || core {
            limits.max_varying_floats = get(MAX_VARYING_VECTORS);
        } else if compat {
            limits.max_varying_floats = get(MAX_VARYING_FLOATS);
        }

        limits.max_vertex_attribs = if es1 { 8 } else { get(gl::MAX_VERTEX_ATTRIBS) };

        // The ARB, KHR and AMD variants share one enum value.
        if info.has_extension("GL_ARB_debug_output")
            || info.has_extension("GL_KHR_debug")
            || info.has_extension("GL_AMD_debug_output")
        {
            limits.max_debug_message_length = get(MAX_DEBUG_MESSAGE_LENGTH);
        }

        limits
    }
}

impl ContextInfo {
    /// Queries the driver through `gl`.
    ///
    /// # Safety
    ///
    /// The native context must be current on the calling thread.
    pub unsafe fn query(gl: &Dispatch) -> Result<ContextInfo> {
        let version = Version::parse(&ContextInfo::query_str(gl, gl::VERSION)?)?;

        let mut info = ContextInfo {
            version,
            vendor: ContextInfo::query_str(gl, gl::VENDOR)?,
            renderer: ContextInfo::query_str(gl, gl::RENDERER)?,
            profile: ContextInfo::query_profile(gl, version),
            extensions: ContextInfo::query_extensions(gl, version)?,
            limits: Limits::default(),
        };

        info.limits = Limits::query(gl, &info);
        Ok(info)
    }

    /// Returns true if the driver supports the extension `name`.
    #[inline]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Returns true if deprecated functionality is available, e.g. on desktop
    /// contexts without core profile.
    pub fn is_compatibility(&self) -> bool {
        match self.version {
            Version::ES(_, _) => false,
            Version::GL(_, _) => self.profile != Some(Profile::Core),
        }
    }

    /// Returns true on desktop contexts with core profile.
    pub fn is_core(&self) -> bool {
        match self.version {
            Version::ES(_, _) => false,
            Version::GL(_, _) => self.profile == Some(Profile::Core),
        }
    }

    /// Returns true on OpenGL ES 1.x, whichever prefix the version string carries.
    pub fn is_es1(&self) -> bool {
        match self.version {
            Version::ES(major, _) => major < 2,
            Version::GL(_, _) => false,
        }
    }

    /// Returns true on OpenGL ES 2.0 and later.
    pub fn is_es2(&self) -> bool {
        match self.version {
            Version::ES(major, _) => major >= 2,
            Version::GL(_, _) => false,
        }
    }

    unsafe fn query_str(gl: &Dispatch, id: GLenum) -> Result<String> {
        ContextInfo::to_string(gl.glGetString(id))
            .ok_or_else(|| Error::Driver(format!("String of {:#x} is null.", id)))?
    }

    unsafe fn to_string(s: *const GLubyte) -> Option<Result<String>> {
        if s.is_null() {
            return None;
        }

        let bytes = CStr::from_ptr(s as *const c_char).to_bytes().to_vec();
        Some(String::from_utf8(bytes).map_err(|_| Error::Driver("String is not valid UTF-8.".into())))
    }

    unsafe fn query_profile(gl: &Dispatch, version: Version) -> Option<Profile> {
        if version >= Version::GL(3, 2) {
            let mut val = 0;
            gl.glGetIntegerv(gl::CONTEXT_PROFILE_MASK, &mut val);
            let val = val as GLenum;
            if (val & gl::CONTEXT_COMPATIBILITY_PROFILE_BIT) != 0 {
                Some(Profile::Compatibility)
            } else if (val & gl::CONTEXT_CORE_PROFILE_BIT) != 0 {
                Some(Profile::Core)
            } else {
                None
            }
        } else {
            None
        }
    }

    unsafe fn query_extensions(gl: &Dispatch, version: Version) -> Result<BTreeSet<String>> {
        let mut extensions = BTreeSet::new();

        if version >= Version::GL(3, 0) || version >= Version::ES(3, 0) {
            let mut num = 0;
            gl.glGetIntegerv(gl::NUM_EXTENSIONS, &mut num);
            for i in 0..num.max(0) {
                if let Some(v) = ContextInfo::to_string(gl.glGetStringi(gl::EXTENSIONS, i as GLuint)) {
                    extensions.insert(v?);
                }
            }
        } else if let Some(list) = ContextInfo::to_string(gl.glGetString(gl::EXTENSIONS)) {
            extensions.extend(list?.split(' ').filter(|v| !v.is_empty()).map(|v| v.to_owned()));
        }

        Ok(extensions)
    }
}
