//! Hammer: a handle and a head joined in a T-shape

use std::path::{Path, PathBuf};

use quick_xml::escape::escape;
use rand::RngCore;
use rand::seq::IndexedRandom;
use tracing::{debug, info};

use super::{Body, URDF_EXTENSION};
use crate::config::{HANDLE_CONFIG, HEAD_CONFIG, LinkConfig};
use crate::error::{GenError, Result};
use crate::link::{CubeLink, CylinderLink, LinkGenerator, MeshLink, PolygonLink};
use crate::pose::{PosePolicy, TShape};
use crate::template::Template;

/// Built-in hammer description template
///
/// Slots: `name`, `handle_link`, `head_link`, `handle_name`, `head_name`.
pub const HAMMER_TEMPLATE: &str = include_str!("../../templates/hammer.xml");

/// Two-part body made of a handle and a head
///
/// Each call to [`Body::generate`] picks one handle and one head generator,
/// samples both parts, places the head with the pose policy and writes
/// `<path>/<name>.urdf`.
pub struct Hammer {
    name: String,
    template: Template,
    handle_generators: Vec<Box<dyn LinkGenerator>>,
    head_generators: Vec<Box<dyn LinkGenerator>>,
    pose_policy: Box<dyn PosePolicy>,
}

impl Hammer {
    /// Create a hammer with the default handle and head ranges
    ///
    /// `template` names a template file; `None` uses [`HAMMER_TEMPLATE`].
    /// Without `mesh_sources` the parts are cube, cylinder or polygon
    /// primitives. With them, both parts are sampled from those OBJ files.
    pub fn new(
        name: impl Into<String>,
        template: Option<&Path>,
        mesh_sources: Option<&[PathBuf]>,
    ) -> Result<Self> {
        Self::with_configs(name, template, mesh_sources, HANDLE_CONFIG, HEAD_CONFIG)
    }

    /// Create a hammer with custom sampling ranges
    pub fn with_configs(
        name: impl Into<String>,
        template: Option<&Path>,
        mesh_sources: Option<&[PathBuf]>,
        handle: LinkConfig,
        head: LinkConfig,
    ) -> Result<Self> {
        let template = match template {
            Some(path) => Template::load(path)?,
            None => Template::new(HAMMER_TEMPLATE),
        };

        let (handle_generators, head_generators) = match mesh_sources {
            None => (
                primitive_generators("handle", &handle),
                primitive_generators("head", &head),
            ),
            Some(sources) => (
                mesh_generators("handle", sources, handle)?,
                mesh_generators("head", sources, head)?,
            ),
        };

        Ok(Self::with_generators(name, template, handle_generators, head_generators))
    }

    /// Create a hammer from explicit generator variants
    pub fn with_generators(
        name: impl Into<String>,
        template: Template,
        handle_generators: Vec<Box<dyn LinkGenerator>>,
        head_generators: Vec<Box<dyn LinkGenerator>>,
    ) -> Self {
        Self {
            name: name.into(),
            template,
            handle_generators,
            head_generators,
            pose_policy: Box::new(TShape),
        }
    }

    /// Replace the head placement policy
    pub fn with_pose_policy(mut self, policy: impl PosePolicy + 'static) -> Self {
        self.pose_policy = Box::new(policy);
        self
    }

    /// Description file written for this body inside `path`
    pub fn urdf_path(&self, path: &Path) -> PathBuf {
        path.join(format!("{}.{}", self.name, URDF_EXTENSION))
    }
}

fn primitive_generators(name: &str, config: &LinkConfig) -> Vec<Box<dyn LinkGenerator>> {
    vec![
        Box::new(CubeLink::new(name, config.clone())),
        Box::new(CylinderLink::new(name, config.clone())),
        Box::new(PolygonLink::new(name, config.clone())),
    ]
}

fn mesh_generators(
    name: &str,
    sources: &[PathBuf],
    config: LinkConfig,
) -> Result<Vec<Box<dyn LinkGenerator>>> {
    let link = MeshLink::new(name, sources, config)?;
    debug!("{name}: sampling from {} OBJ files", link.sources().len());
    Ok(vec![Box::new(link)])
}

impl Body for Hammer {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, path: &Path, rng: &mut dyn RngCore) -> Result<PathBuf> {
        let handle_generator = self
            .handle_generators
            .choose(rng)
            .ok_or(GenError::NoGenerators("handle"))?;
        let head_generator = self
            .head_generators
            .choose(rng)
            .ok_or(GenError::NoGenerators("head"))?;

        let handle_data = handle_generator.generate(path, rng)?;
        let mut head_data = head_generator.generate(path, rng)?;

        // Place the head in the handle frame
        let pose = self
            .pose_policy
            .sample_head_transformation(&handle_data, &head_data, rng);
        head_data.position = pose.apply(head_data.position);
        head_data.orientation = pose.rotation;
        debug!("hammer {:?}: head pose {:?}", self.name, pose);

        let handle_urdf = handle_generator.convert_data_to_urdf(&handle_data)?;
        let head_urdf = head_generator.convert_data_to_urdf(&head_data)?;

        // Plain-text slots land in attribute values
        let name = escape(self.name.as_str());
        let handle_name = escape(handle_data.name.as_str());
        let head_name = escape(head_data.name.as_str());
        let urdf = self.template.render(&[
            ("name", &*name),
            ("handle_link", handle_urdf.as_str()),
            ("head_link", head_urdf.as_str()),
            ("handle_name", &*handle_name),
            ("head_name", &*head_name),
        ])?;

        let urdf_path = self.urdf_path(path);
        std::fs::write(&urdf_path, urdf).map_err(|e| GenError::io(&urdf_path, e))?;

        info!("Wrote {}", urdf_path.display());
        Ok(urdf_path)
    }
}
