//! Interpreter that converts an L-System symbol string into a [`PlantMesh`].
//!
//! The entry point is [`PlantInterpreter`]. Construct it with an
//! [`LSystemConfig`] (the standard plant alphabet is preloaded), optionally
//! remap symbols via [`PlantInterpreter::set_op`] or
//! [`PlantInterpreter::with_map`], then call
//! [`PlantInterpreter::build_mesh`] with the expanded symbol string.

use std::collections::HashMap;
use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use rand::Rng;

use crate::lsystem::LSystemConfig;
use crate::mesh::{PlantMesh, VertexIndex};
use crate::turtle::{PlantOp, PlantTurtleState};

/// Radial resolution of branch tubes. Four side faces keep vertex counts low
/// while still shading as a rounded branch once normals are smoothed.
const RADIAL_SEGMENTS: u32 = 4;

/// Maximum stack depth for push/pop operations.
const MAX_STACK_DEPTH: usize = 1024;

/// Branch color at full segment length (trunk), linear RGB.
const BARK_COLOR: Vec3 = Vec3::new(0.4, 0.2, 0.1);

/// Branch color at fully decayed twig tips, linear RGB.
const SHOOT_COLOR: Vec3 = Vec3::new(0.2, 0.6, 0.2);

/// Leaf greens, one drawn uniformly per leaf.
const LEAF_PALETTE: [Vec3; 6] = [
    Vec3::new(0.1, 0.7, 0.1),
    Vec3::new(0.2, 0.8, 0.2),
    Vec3::new(0.15, 0.6, 0.15),
    Vec3::new(0.3, 0.9, 0.3),
    Vec3::new(0.05, 0.5, 0.05),
    Vec3::new(0.25, 0.75, 0.25),
];

/// Total random spin range about the frame's direction axis, degrees.
const LEAF_SPIN_DEG: f32 = 120.0;

/// Total random tilt range about the frame's right axis, degrees.
const LEAF_TILT_DEG: f32 = 60.0;

/// Total random sway range about the frame's up axis, degrees.
const LEAF_SWAY_DEG: f32 = 40.0;

/// Interprets L-System output to build a plant mesh.
pub struct PlantInterpreter {
    op_map: HashMap<char, PlantOp>,
    config: LSystemConfig,
}

impl PlantInterpreter {
    /// Creates a new interpreter with the standard plant alphabet preloaded.
    ///
    /// See the crate README for the full symbol table. Use
    /// [`set_op`](Self::set_op) or [`with_map`](Self::with_map) to deviate
    /// from it.
    pub fn new(config: LSystemConfig) -> Self {
        let mut interpreter = Self {
            op_map: HashMap::new(),
            config,
        };
        interpreter.populate_standard_symbols();
        interpreter
    }

    /// Replaces the entire symbol-to-operation map in one step (builder
    /// pattern). Symbols absent from `map` are treated as [`PlantOp::Ignore`].
    pub fn with_map(mut self, map: HashMap<char, PlantOp>) -> Self {
        self.op_map = map;
        self
    }

    /// Assigns a single [`PlantOp`] to a symbol, replacing any prior mapping.
    pub fn set_op(&mut self, symbol: char, op: PlantOp) {
        self.op_map.insert(symbol, op);
    }

    /// Registers the conventional symbol-to-operation mappings.
    pub fn populate_standard_symbols(&mut self) {
        let mappings = [
            // Geometry
            ('F', PlantOp::Forward),
            ('A', PlantOp::Forward),
            ('L', PlantOp::Leaf),
            // Spatial
            ('+', PlantOp::Yaw(1.0)),
            ('-', PlantOp::Yaw(-1.0)),
            ('&', PlantOp::Pitch(1.0)),
            ('^', PlantOp::Pitch(-1.0)),
            ('\\', PlantOp::Roll(1.0)),
            ('/', PlantOp::Roll(-1.0)),
            // Flow
            ('[', PlantOp::Push),
            (']', PlantOp::Pop),
        ];

        for (sym, op) in mappings {
            self.set_op(sym, op);
        }
    }

    /// Interprets `symbols` in order and returns the finished mesh.
    ///
    /// The turtle starts at the world origin facing `+Y` with up `+Z`.
    /// Symbols with no registered mapping are silently ignored; a pop on an
    /// empty stack is a no-op; pushes beyond the 1024-entry stack cap are
    /// silently dropped. An empty string yields an empty mesh.
    ///
    /// `rng` drives leaf orientation jitter and palette choice only — branch
    /// geometry is fully deterministic for a given config and string. Vertex
    /// normals are computed once the whole string is consumed.
    pub fn build_mesh<R: Rng>(&self, symbols: &str, rng: &mut R) -> PlantMesh {
        let mut mesh = PlantMesh::new();
        let mut turtle = PlantTurtleState::new(&self.config);
        let mut stack: Vec<PlantTurtleState> = Vec::new();
        let angle = self.config.angle.to_radians();

        for sym in symbols.chars() {
            let op = self.op_map.get(&sym).copied().unwrap_or(PlantOp::Ignore);

            match op {
                PlantOp::Forward => {
                    self.emit_segment(&mut mesh, &turtle);
                    turtle.position += turtle.direction * turtle.length;
                    turtle.length *= self.config.length_decay;
                    turtle.thickness *= self.config.thickness_decay;
                }
                PlantOp::Leaf => self.emit_leaf(&mut mesh, &turtle, rng),
                PlantOp::Yaw(sign) => turtle.yaw(angle * sign),
                PlantOp::Pitch(sign) => turtle.pitch(angle * sign),
                PlantOp::Roll(sign) => turtle.roll(angle * sign),
                PlantOp::Push => {
                    if stack.len() < MAX_STACK_DEPTH {
                        stack.push(turtle.clone());
                    }
                }
                PlantOp::Pop => {
                    if let Some(state) = stack.pop() {
                        turtle = state;
                    }
                }
                PlantOp::Ignore => {}
            }
        }

        mesh.compute_normals();
        tracing::debug!(
            vertices = mesh.vertex_count(),
            triangles = mesh.triangle_count(),
            "built plant mesh"
        );
        mesh
    }

    /// Emits one branch segment: a [`RADIAL_SEGMENTS`]-sided open prism from
    /// the turtle position to position + direction × length.
    ///
    /// Vertices interleave as start/end pairs per radial spoke, so a segment
    /// contributes `RADIAL_SEGMENTS * 2` vertices and `RADIAL_SEGMENTS * 2`
    /// side triangles. Color fades from bark brown toward shoot green as the
    /// segment length decays relative to the configured base length.
    fn emit_segment(&self, mesh: &mut PlantMesh, turtle: &PlantTurtleState) {
        let start = turtle.position;
        let end = start + turtle.direction * turtle.length;
        let radius = turtle.thickness;

        let maturity = (turtle.length / self.config.length).min(1.0);
        let color = BARK_COLOR.lerp(SHOOT_COLOR, 1.0 - maturity);

        let base = mesh.vertex_count() as VertexIndex;
        for i in 0..RADIAL_SEGMENTS {
            let theta = (i as f32 / RADIAL_SEGMENTS as f32) * TAU;
            let offset =
                turtle.right * (theta.cos() * radius) + turtle.up * (theta.sin() * radius);
            mesh.push_vertex(start + offset, color);
            mesh.push_vertex(end + offset, color);
        }

        for i in 0..RADIAL_SEGMENTS {
            let next = (i + 1) % RADIAL_SEGMENTS;
            let spoke = base + i * 2;
            let next_spoke = base + next * 2;
            mesh.push_triangle(spoke, spoke + 1, next_spoke);
            mesh.push_triangle(next_spoke, spoke + 1, next_spoke + 1);
        }
    }

    /// Emits one double-sided leaf polygon at the turtle position.
    ///
    /// The leaf frame is the branch frame jittered by three independent
    /// uniform rotations (spin about direction, tilt about right, sway about
    /// up) so neighbouring leaves are not coplanar. Six vertices — tip, two
    /// mid lobes, two base lobes offset out of plane, and a short stem tail —
    /// are triangulated with both winding orders so the leaf renders from
    /// either face.
    fn emit_leaf<R: Rng>(&self, mesh: &mut PlantMesh, turtle: &PlantTurtleState, rng: &mut R) {
        let size = self.config.leaf_size;
        let center = turtle.position;

        let spin = (rng.gen_range(0.0..1.0f32) - 0.5) * LEAF_SPIN_DEG.to_radians();
        let tilt = (rng.gen_range(0.0..1.0f32) - 0.5) * LEAF_TILT_DEG.to_radians();
        let sway = (rng.gen_range(0.0..1.0f32) - 0.5) * LEAF_SWAY_DEG.to_radians();
        let jitter = Quat::from_axis_angle(turtle.up, sway)
            * Quat::from_axis_angle(turtle.right, tilt)
            * Quat::from_axis_angle(turtle.direction, spin);

        // Midrib along the jittered growth direction; half-width along the
        // jittered right; a slight out-of-plane cup along the jittered up.
        let midrib = (jitter * turtle.direction) * size;
        let half_width = (jitter * turtle.right) * (size * 0.4);
        let cup = (jitter * turtle.up) * (size * 0.1);

        let color = LEAF_PALETTE[rng.gen_range(0..LEAF_PALETTE.len())];

        let base = mesh.vertex_count() as VertexIndex;
        mesh.push_vertex(center + midrib, color);
        mesh.push_vertex(center + midrib * 0.4 - half_width * 0.8, color);
        mesh.push_vertex(center + midrib * 0.4 + half_width * 0.8, color);
        mesh.push_vertex(center - half_width + cup * 0.5, color);
        mesh.push_vertex(center + half_width - cup * 0.5, color);
        mesh.push_vertex(center - midrib * 0.2, color);

        // Front face.
        mesh.push_triangle(base, base + 1, base + 2);
        mesh.push_triangle(base + 1, base + 3, base + 5);
        mesh.push_triangle(base + 2, base + 5, base + 4);
        mesh.push_triangle(base + 1, base + 5, base + 2);
        // Back face, reversed winding.
        mesh.push_triangle(base, base + 2, base + 1);
        mesh.push_triangle(base + 1, base + 5, base + 3);
        mesh.push_triangle(base + 2, base + 4, base + 5);
        mesh.push_triangle(base + 1, base + 2, base + 5);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lsystem::presets;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn interpreter() -> PlantInterpreter {
        PlantInterpreter::new(presets()[0].clone())
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn empty_string_yields_empty_mesh() {
        let mesh = interpreter().build_mesh("", &mut rng());
        assert!(mesh.is_empty());
        assert!(mesh.indices.is_empty());
    }

    #[test]
    fn forward_emits_one_tube() {
        let mesh = interpreter().build_mesh("F", &mut rng());
        assert_eq!(mesh.vertex_count(), (RADIAL_SEGMENTS * 2) as usize);
        assert_eq!(mesh.triangle_count(), (RADIAL_SEGMENTS * 2) as usize);
    }

    #[test]
    fn leaf_emits_six_vertices_double_sided() {
        let mesh = interpreter().build_mesh("L", &mut rng());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(mesh.triangle_count(), 8);
    }

    #[test]
    fn unknown_symbols_are_ignored() {
        let plain = interpreter().build_mesh("FF", &mut rng());
        let noisy = interpreter().build_mesh("F?!xF", &mut rng());
        assert_eq!(plain.positions, noisy.positions);
        assert_eq!(plain.indices, noisy.indices);
    }

    #[test]
    fn unbalanced_pops_are_tolerated() {
        let plain = interpreter().build_mesh("FF", &mut rng());
        let popped = interpreter().build_mesh("]]FF]", &mut rng());
        assert_eq!(plain.positions, popped.positions);
    }

    #[test]
    fn bracketed_rotations_are_discarded_on_pop() {
        // State restored by `]` must match the pre-`[` state bit for bit,
        // so the trailing F lands exactly where the unbracketed twin puts it.
        let twin = interpreter().build_mesh("FF", &mut rng());
        let branched = interpreter().build_mesh("F[+^\\+]F", &mut rng());
        assert_eq!(twin.positions, branched.positions);
    }

    #[test]
    fn custom_symbol_map_overrides_standard() {
        let mut custom = interpreter();
        custom.set_op('F', PlantOp::Ignore);
        let mesh = custom.build_mesh("FFF", &mut rng());
        assert!(mesh.is_empty());
    }

    #[test]
    fn leaf_jitter_draws_from_injected_rng() {
        let a = interpreter().build_mesh("L", &mut StdRng::seed_from_u64(1));
        let b = interpreter().build_mesh("L", &mut StdRng::seed_from_u64(1));
        let c = interpreter().build_mesh("L", &mut StdRng::seed_from_u64(2));
        assert_eq!(a.positions, b.positions);
        assert_ne!(a.positions, c.positions);
    }
}
