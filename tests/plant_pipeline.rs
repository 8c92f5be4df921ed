// tests/plant_pipeline.rs
use florasynth::{
    LSystemConfig, LSystemRule, PlantInterpreter, presets, rewrite_once,
};
use glam::Vec3;
use rand::SeedableRng;
use rand::rngs::StdRng;

const SEGMENT_VERTS: usize = 8;
const SEGMENT_TRIS: usize = 8;

fn straight_config(length_decay: f32, thickness_decay: f32) -> LSystemConfig {
    LSystemConfig {
        axiom: "F".into(),
        rules: vec![LSystemRule::new('F', "FF")],
        iterations: 3,
        angle: 25.0,
        length: 1.0,
        length_decay,
        thickness_decay,
        thickness: 0.1,
        leaf_size: 0.3,
        leaf_probability: 1.0,
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(99)
}

#[test]
fn zero_iterations_leave_axiom_untouched() {
    let mut config = presets()[0].clone();
    config.iterations = 0;
    assert_eq!(config.generate(), config.axiom);
}

#[test]
fn expansion_composes_one_pass_at_a_time() {
    let config = straight_config(0.8, 0.7);
    let mut expected = config.axiom.clone();
    for _ in 0..config.iterations {
        expected = rewrite_once(&expected, &config.rules);
    }
    assert_eq!(config.generate(), expected);
    assert_eq!(expected.len(), 8); // F doubles per pass: 1 -> 2 -> 4 -> 8
}

#[test]
fn forward_run_emits_one_tube_per_symbol() {
    let config = straight_config(0.8, 0.7);
    let interpreter = PlantInterpreter::new(config);
    for n in 1..=6usize {
        let symbols = "F".repeat(n);
        let mesh = interpreter.build_mesh(&symbols, &mut rng());
        assert_eq!(mesh.vertex_count(), n * SEGMENT_VERTS);
        assert_eq!(mesh.triangle_count(), n * SEGMENT_TRIS);
    }
}

#[test]
fn forward_steps_decay_geometrically() {
    let config = straight_config(0.8, 0.7);
    let interpreter = PlantInterpreter::new(config.clone());
    let mesh = interpreter.build_mesh("FFFFF", &mut rng());

    // Vertex 0 of each segment sits at ring angle 0: start + right * radius,
    // i.e. (thickness_k, y_k, 0) on an unrotated turtle.
    let mut expected_y = 0.0f32;
    for k in 0..5 {
        let spoke = mesh.positions[k * SEGMENT_VERTS];
        let expected_radius = config.thickness * config.thickness_decay.powi(k as i32);
        assert!(spoke.abs_diff_eq(Vec3::new(expected_radius, expected_y, 0.0), 1e-5));
        expected_y += config.length * config.length_decay.powi(k as i32);
    }

    // Each advance is strictly shorter than the one before it.
    let mut last_step = f32::INFINITY;
    for k in 0..5 {
        let start = mesh.positions[k * SEGMENT_VERTS];
        let end = mesh.positions[k * SEGMENT_VERTS + 1];
        let step = (end - start).length();
        assert!(step < last_step);
        last_step = step;
    }
}

#[test]
fn branch_stack_restores_state_exactly() {
    let interpreter = PlantInterpreter::new(straight_config(0.8, 0.7));
    // Everything inside the brackets — rotations, a drawn branch, a leaf —
    // must leave the trailing F exactly where the unbracketed twin puts it.
    let twin = interpreter.build_mesh("FF", &mut rng());
    let branched = interpreter.build_mesh("F[+F^L\\F]F", &mut rng());
    let trailing = &branched.positions[branched.positions.len() - SEGMENT_VERTS..];
    let expected = &twin.positions[twin.positions.len() - SEGMENT_VERTS..];
    assert_eq!(trailing, expected);
}

#[test]
fn unbalanced_pops_are_silent_no_ops() {
    let interpreter = PlantInterpreter::new(straight_config(0.8, 0.7));
    let plain = interpreter.build_mesh("FF", &mut rng());
    let unbalanced = interpreter.build_mesh("]F]]F]", &mut rng());
    assert_eq!(plain.positions, unbalanced.positions);
    assert_eq!(plain.indices, unbalanced.indices);
}

#[test]
fn mesh_buffers_stay_parallel_and_in_range() {
    for config in presets() {
        let symbols = config.generate();
        let mesh = PlantInterpreter::new(config).build_mesh(&symbols, &mut rng());
        assert_eq!(mesh.positions.len(), mesh.colors.len());
        assert_eq!(mesh.positions.len(), mesh.normals.len());
        assert_eq!(mesh.indices.len() % 3, 0);
        let max = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < max));
        assert!(!mesh.is_empty());
    }
}

#[test]
fn branch_colors_shift_toward_green_at_the_tips() {
    let interpreter = PlantInterpreter::new(straight_config(0.5, 0.5));
    let mesh = interpreter.build_mesh("FFFF", &mut rng());
    let trunk = mesh.colors[0];
    let tip = mesh.colors[3 * SEGMENT_VERTS];
    // Green channel rises and red falls as segments decay.
    assert!(tip.y > trunk.y);
    assert!(tip.x < trunk.x);
}

#[test]
fn full_preset_pipeline_is_stable_under_seeded_rng() {
    let config = presets()[3].clone();
    let symbols = config.generate();
    let interpreter = PlantInterpreter::new(config);
    let a = interpreter.build_mesh(&symbols, &mut StdRng::seed_from_u64(17));
    let b = interpreter.build_mesh(&symbols, &mut StdRng::seed_from_u64(17));
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.colors, b.colors);
    assert_eq!(a.indices, b.indices);
}
