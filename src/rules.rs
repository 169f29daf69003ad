/*
 * Neighbour Rules Module
 *
 * Pairwise flocking contributions. For each neighbour found through the grid
 * the evaluator adds separation, cohesion and alignment terms into the boid's
 * private accumulators, and bleeds the neighbour's tint into the boid's colour
 * when the two are in contact.
 */

use crate::boid::Boid;
use crate::error::SimResult;
use crate::params::RuleParams;
use crate::vector::Vector2;

// Separation is scaled by 1 / (d / SEPARATION_FALLOFF)
const SEPARATION_FALLOFF: f32 = 2.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulators {
    pub separation: Vector2,
    pub cohesion: Vector2,
    pub alignment: Vector2,
}

/// Add the contribution of `other` to `acc`.
///
/// `boid` is the working copy being updated this tick. Its colour is rewritten
/// in place for every neighbour in contact range, so the order in which
/// neighbours are visited matters for the tint but not for the forces.
pub fn accumulate(
    boid: &mut Boid,
    other: &Boid,
    acc: &mut Accumulators,
    rules: &RuleParams,
) -> SimResult<()> {
    let offset = boid.position - other.position;
    let distance = offset.magnitude();

    // Colour bleed runs even for coincident neighbours
    if distance <= rules.contact_radius {
        boid.color = boid.color - boid.color.unit() + other.color.unit();
    }

    if distance <= rules.coincident_radius || distance > rules.interaction_radius {
        return Ok(());
    }

    acc.separation += (offset.unit() * rules.separation_factor).divide(distance / SEPARATION_FALLOFF)?;
    acc.cohesion += (other.position - boid.position).unit() * rules.cohesion_factor;

    if distance <= rules.alignment_radius {
        acc.alignment += (boid.velocity - other.velocity).unit() * rules.alignment_factor;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boid_at(x: f32, y: f32) -> Boid {
        Boid::new(Vector2::new(x, y))
    }

    fn assert_close(a: Vector2, b: Vector2) {
        assert!((a - b).magnitude() < 1e-5, "{a:?} != {b:?}");
    }

    #[test]
    fn separation_at_five_units() {
        let rules = RuleParams::default();
        let mut boid = boid_at(10.0, 10.0);
        let other = boid_at(13.0, 14.0);
        let mut acc = Accumulators::default();

        accumulate(&mut boid, &other, &mut acc, &rules).unwrap();

        // unit(p1 - p2) * 30 / (5 / 2)
        let direction = Vector2::new(-0.6, -0.8);
        assert_close(acc.separation, direction * 12.0);
        assert!((acc.separation.magnitude() - 12.0).abs() < 1e-5);
        assert_close(acc.cohesion, direction * -1.0);
    }

    #[test]
    fn alignment_only_inside_alignment_radius() {
        let rules = RuleParams::default();
        let mut boid = boid_at(0.0, 0.0);
        boid.velocity = Vector2::new(1.0, 0.0);
        let mut near = boid_at(8.0, 0.0);
        near.velocity = Vector2::new(0.0, 1.0);
        let mut far = boid_at(50.0, 0.0);
        far.velocity = Vector2::new(0.0, 1.0);

        let mut acc = Accumulators::default();
        accumulate(&mut boid, &far, &mut acc, &rules).unwrap();
        assert_eq!(acc.alignment, Vector2::ZERO);
        assert!(acc.cohesion.magnitude() > 0.0);

        accumulate(&mut boid, &near, &mut acc, &rules).unwrap();
        let expected = Vector2::new(1.0, -1.0).unit() * 0.1;
        assert_close(acc.alignment, expected);
    }

    #[test]
    fn coincident_neighbour_adds_no_force_but_bleeds_colour() {
        let rules = RuleParams::default();
        let mut boid = boid_at(5.0, 5.0);
        boid.color = Vector2::new(100.0, 0.0);
        let mut other = boid_at(5.5, 5.0);
        other.color = Vector2::new(0.0, 50.0);

        let mut acc = Accumulators::default();
        accumulate(&mut boid, &other, &mut acc, &rules).unwrap();

        assert_eq!(acc, Accumulators::default());
        assert_close(boid.color, Vector2::new(99.0, 1.0));
    }

    #[test]
    fn colour_bleed_accumulates_per_neighbour() {
        let rules = RuleParams::default();
        let mut boid = boid_at(0.0, 0.0);
        boid.color = Vector2::new(10.0, 0.0);
        let mut other = boid_at(12.0, 0.0);
        other.color = Vector2::new(0.0, 200.0);

        let mut acc = Accumulators::default();
        accumulate(&mut boid, &other, &mut acc, &rules).unwrap();
        accumulate(&mut boid, &other, &mut acc, &rules).unwrap();

        // second step starts from the already shifted colour (9, 1)
        let first = Vector2::new(9.0, 1.0);
        let second = first - first.unit() + Vector2::new(0.0, 1.0);
        assert_close(boid.color, second);
    }

    #[test]
    fn neighbours_beyond_interaction_radius_are_ignored() {
        let rules = RuleParams::default();
        let mut boid = boid_at(0.0, 0.0);
        boid.color = Vector2::new(1.0, 2.0);
        let other = boid_at(100.5, 0.0);

        let mut acc = Accumulators::default();
        accumulate(&mut boid, &other, &mut acc, &rules).unwrap();
        assert_eq!(acc, Accumulators::default());
        assert_eq!(boid.color, Vector2::new(1.0, 2.0));

        // exactly on the radius still counts
        let edge = boid_at(100.0, 0.0);
        accumulate(&mut boid, &edge, &mut acc, &rules).unwrap();
        assert_close(acc.cohesion, Vector2::new(1.0, 0.0));
    }
}
