//! Node class and parameter names understood by the host.
//!
//! These strings are a wire contract and must match the host exactly.

/// Main-input parameter shared by every shader in a chain.
pub const INPUT_NODE: &str = "input_node";

pub const CRATER_SHADER: &str = "crater_shader";
pub const GROUP: &str = "group";
pub const SIMPLE_SHAPE_SHADER: &str = "simple_shape_shader";
pub const FRACTAL_WARP_SHADER: &str = "fractal_warp_shader";
pub const MERGE_SHADER: &str = "merge_shader";
pub const COMPUTE_TERRAIN: &str = "compute_terrain";

pub const ALPINE_FRACTAL_SHADER_V2: &str = "alpine_fractal_shader_v2";
pub const DISPLACEMENT_SHADER: &str = "displacement_shader";
pub const FAKE_STONES_SHADER: &str = "fake_stones_shader";
pub const IMAGE_MAP_SHADER: &str = "image_map_shader";
pub const POWER_FRACTAL_SHADER_V3: &str = "power_fractal_shader_v3";
pub const STRATA_AND_OUTCROPS_SHADER_V2: &str = "strata_and_outcrops_shader_v2";
pub const TWIST_AND_SHEAR_SHADER: &str = "twist_and_shear_shader";

pub mod crater {
    pub const CENTER: &str = "center";
    pub const DIAMETER: &str = "diameter";
    pub const DEPTH: &str = "depth";
    pub const RIM_HEIGHT: &str = "rim_height";
    pub const RIM_SKIRT: &str = "rim_skirt";
    pub const RIM_SOFTNESS: &str = "rim_softness";
    pub const RIM_TIGHTNESS: &str = "rim_tightness";
    pub const GUI_GROUP: &str = "gui_group";
    pub const RIM_SHADER: &str = "rim_shader";
}

pub mod group {
    pub const NAME: &str = "name";
}

pub mod simple_shape {
    pub const POSITION: &str = "position";
    pub const TYPE_OF_SHAPE: &str = "type_of_shape";
    pub const SIZE: &str = "size";
    pub const DISPLACEMENT_AMPLITUDE: &str = "displacement_amplitude";
    pub const DISPLACEMENT_EDGE_PROFILE: &str = "displacement_edge_profile";
    pub const DISPLACEMENT_EDGE_WIDTH: &str = "displacement_edge_width";
    pub const DISPLACEMENT_EDGE_UNITS: &str = "displacement_edge_units";
    pub const APPLY_DISPLACEMENT: &str = "apply_displacement";

    /// Circle / ellipse.
    pub const SHAPE_CIRCLE: &str = "1";
    /// Smooth step.
    pub const EDGE_PROFILE_SMOOTH: &str = "1";
    pub const EDGE_WIDTH_MAX: &str = "100";
    pub const EDGE_UNITS_PERCENT: &str = "1";
}

pub mod fractal_warp {
    pub const SCALE: &str = "scale";
}

pub mod merge {
    /// Primary input of a merge shader.
    pub const SHADER_A: &str = "shader_A";
    pub const MIX_TO_A: &str = "mix_to_A";
    pub const MERGE_COLOUR: &str = "merge_colour";
    pub const COLOUR_MERGE_MODE: &str = "colour_merge_mode";
    pub const MERGE_DISPLACEMENT: &str = "merge_displacement";
    pub const DISPLACE_MERGE_MODE: &str = "displace_merge_mode";
}

pub mod fake_stones {
    pub const STONE_SCALE: &str = "stone_scale";
}

/// Parameter value for an enabled flag or a full mix.
pub const ON: &str = "1";
