//! Part (link) generators
//!
//! A `LinkGenerator` samples one rigid part, writes its mesh into the output
//! directory, and renders the sampled data as a URDF `<link>` fragment.
//!
//! Variants:
//! - [`CubeLink`], [`CylinderLink`], [`PolygonLink`]: procedural primitives
//! - [`MeshLink`]: rescaled copies of existing OBJ files

mod mesh;
mod primitive;

use std::path::{Path, PathBuf};

use glam::DVec3;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, Event};
use rand::RngCore;
use tracing::warn;

use crate::config::{LinkConfig, sample_range};
use crate::error::{GenError, Result};
use crate::mesh::{UnpackedMesh, write_obj};

pub use mesh::{MeshLink, collect_obj_paths};
pub use primitive::{
    CubeLink, CylinderLink, POLYGON_MAX_SIDES, POLYGON_MIN_SIDES, PolygonLink,
};

/// Smallest extent a part can have along any axis
pub const MIN_PART_SIZE: f64 = 0.001;

/// Sampled data for one part
#[derive(Clone, Debug, PartialEq)]
pub struct PartData {
    /// Link name, also the mesh file stem
    pub name: String,
    /// Center (x, y, z) in the body frame
    pub position: DVec3,
    /// Orientation (roll, pitch, yaw) in radians
    pub orientation: DVec3,
    /// Extent along each local axis (size_x, size_y, size_z)
    pub size: DVec3,
    pub mass: f64,
    pub lateral_friction: f64,
    pub spinning_friction: f64,
    pub inertia_friction: f64,
    /// Principal moments (ixx, iyy, izz) about the part center
    pub inertia: DVec3,
    /// Mesh file name relative to the output directory
    pub filename: String,
    /// Mesh scale written into the URDF
    pub scale: DVec3,
}

impl PartData {
    /// Sample mass, size and friction from `config`; pose starts at the origin
    pub fn sample(name: &str, config: &LinkConfig, rng: &mut dyn RngCore) -> Self {
        let mass = sample_range(rng, config.mass_range);
        let size = DVec3::new(
            sample_range(rng, config.size_range[0]),
            sample_range(rng, config.size_range[1]),
            sample_range(rng, config.size_range[2]),
        );
        let size = clamp_size(name, size);
        let lateral_friction = sample_range(rng, config.lateral_friction_range);
        let spinning_friction = sample_range(rng, config.spinning_friction_range);
        let inertia_friction = sample_range(rng, config.inertia_friction_range);

        Self {
            name: name.to_string(),
            position: DVec3::ZERO,
            orientation: DVec3::ZERO,
            size,
            mass,
            lateral_friction,
            spinning_friction,
            inertia_friction,
            inertia: box_inertia(mass, size),
            filename: format!("{name}.obj"),
            scale: DVec3::ONE,
        }
    }

    /// Path of this part's mesh inside `dir`
    pub fn mesh_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.filename)
    }

    /// Write `mesh` to this part's mesh path inside `dir`
    pub(crate) fn write_mesh(&self, dir: &Path, mesh: &UnpackedMesh) -> Result<()> {
        write_obj(mesh, &self.mesh_path(dir), &self.name)
    }
}

/// Raise every axis of `size` to at least [`MIN_PART_SIZE`]
fn clamp_size(name: &str, size: DVec3) -> DVec3 {
    let clamped = size.max(DVec3::splat(MIN_PART_SIZE));
    if clamped != size {
        warn!("{name}: size {size:?} below {MIN_PART_SIZE}, clamping to {clamped:?}");
    }
    clamped
}

/// Generator for one kind of part
pub trait LinkGenerator {
    /// Link name used for the generated part
    fn name(&self) -> &str;

    /// Sample a part, write its mesh into `path`, and return the sampled data
    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PartData>;

    /// Render part data as a URDF `<link>` fragment
    fn convert_data_to_urdf(&self, data: &PartData) -> Result<String> {
        link_urdf(data)
    }
}

/// Solid cuboid moments of inertia
pub fn box_inertia(mass: f64, size: DVec3) -> DVec3 {
    let sq = size * size;
    DVec3::new(sq.y + sq.z, sq.x + sq.z, sq.x + sq.y) * (mass / 12.0)
}

/// Solid elliptic cylinder (axis along Z) moments of inertia
pub fn elliptic_cylinder_inertia(mass: f64, size: DVec3) -> DVec3 {
    let a = size.x * 0.5;
    let b = size.y * 0.5;
    let h = size.z;
    DVec3::new(
        mass * (b * b / 4.0 + h * h / 12.0),
        mass * (a * a / 4.0 + h * h / 12.0),
        mass * (a * a + b * b) / 4.0,
    )
}

fn number(value: f64) -> String {
    format!("{value:.6}")
}

fn vec3(v: DVec3) -> String {
    format!("{:.6} {:.6} {:.6}", v.x, v.y, v.z)
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| GenError::Xml(e.to_string()))
}

fn write_start(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<()> {
    write_event(writer, Event::Start(BytesStart::new(tag)))
}

fn write_end(writer: &mut Writer<Vec<u8>>, tag: &str) -> Result<()> {
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

/// Empty element such as `<mass value="..."/>`
fn write_empty(
    writer: &mut Writer<Vec<u8>>,
    tag: &str,
    attributes: &[(&str, &str)],
) -> Result<()> {
    let mut element = BytesStart::new(tag);
    for &attribute in attributes {
        element.push_attribute(attribute);
    }
    write_event(writer, Event::Empty(element))
}

/// URDF `<link>` element for a sampled part
///
/// Attribute values are XML-escaped, so any part name or mesh file name
/// yields a well-formed fragment.
pub fn link_urdf(data: &PartData) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    let xyz = vec3(data.position);
    let rpy = vec3(data.orientation);
    let scale = vec3(data.scale);
    let origin = [("xyz", xyz.as_str()), ("rpy", rpy.as_str())];

    let mut link = BytesStart::new("link");
    link.push_attribute(("name", data.name.as_str()));
    write_event(&mut writer, Event::Start(link))?;

    write_start(&mut writer, "contact")?;
    let lateral = number(data.lateral_friction);
    let spinning = number(data.spinning_friction);
    let inertia_scaling = number(data.inertia_friction);
    write_empty(&mut writer, "lateral_friction", &[("value", lateral.as_str())])?;
    write_empty(&mut writer, "spinning_friction", &[("value", spinning.as_str())])?;
    write_empty(&mut writer, "inertia_scaling", &[("value", inertia_scaling.as_str())])?;
    write_end(&mut writer, "contact")?;

    write_start(&mut writer, "inertial")?;
    write_empty(&mut writer, "origin", &origin)?;
    let mass = number(data.mass);
    write_empty(&mut writer, "mass", &[("value", mass.as_str())])?;
    let ixx = number(data.inertia.x);
    let iyy = number(data.inertia.y);
    let izz = number(data.inertia.z);
    write_empty(
        &mut writer,
        "inertia",
        &[
            ("ixx", ixx.as_str()),
            ("ixy", "0"),
            ("ixz", "0"),
            ("iyy", iyy.as_str()),
            ("iyz", "0"),
            ("izz", izz.as_str()),
        ],
    )?;
    write_end(&mut writer, "inertial")?;

    for tag in ["visual", "collision"] {
        write_start(&mut writer, tag)?;
        write_empty(&mut writer, "origin", &origin)?;
        write_start(&mut writer, "geometry")?;
        write_empty(
            &mut writer,
            "mesh",
            &[("filename", data.filename.as_str()), ("scale", scale.as_str())],
        )?;
        write_end(&mut writer, "geometry")?;
        write_end(&mut writer, tag)?;
    }

    write_end(&mut writer, "link")?;

    String::from_utf8(writer.into_inner()).map_err(|e| GenError::Xml(e.to_string()))
}
