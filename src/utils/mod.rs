/// 几何工具
/// Geometry utilities

use crate::landmarks::Point2;

/// 顶点b处由射线b→a与b→c构成的内角 (度)
///
/// atan2差值取绝对值,大于180°时取补角(360°-x),输出恒在[0, 180]。
/// 纯函数,a与c的顺序不影响结果。
pub fn joint_angle(a: Point2, b: Point2, c: Point2) -> f32 {
    let radians = (c.y - b.y).atan2(c.x - b.x) - (a.y - b.y).atan2(a.x - b.x);
    let mut angle = radians.to_degrees().abs();
    if angle > 180.0 {
        angle = 360.0 - angle;
    }
    angle
}

/// 屈曲角: 180° - 内角,关节完全伸直时读数接近0°
pub fn flexion_angle(a: Point2, b: Point2, c: Point2) -> f32 {
    180.0 - joint_angle(a, b, c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> Point2 {
        Point2::new(x, y)
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle(p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0));
        assert!((angle - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_collinear_is_straight() {
        // b位于a与c之间的共线配置 → 180°
        let angle = joint_angle(p(0.0, 0.0), p(0.5, 0.5), p(1.0, 1.0));
        assert!((angle - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_coincident_rays_are_zero() {
        // a == c (b不退化) → 0°
        let angle = joint_angle(p(0.3, 0.7), p(0.5, 0.5), p(0.3, 0.7));
        assert!(angle.abs() < 1e-4);
    }

    #[test]
    fn test_symmetry() {
        let (a, b, c) = (p(0.12, 0.88), p(0.45, 0.31), p(0.91, 0.64));
        assert!((joint_angle(a, b, c) - joint_angle(c, b, a)).abs() < 1e-4);
    }

    #[test]
    fn test_reflex_correction() {
        // 射线方向170°与-170°: atan2差值340°,补角修正后为20°
        let angle = joint_angle(p(-0.985, 0.174), p(0.0, 0.0), p(-0.985, -0.174));
        assert!((angle - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_output_range() {
        let samples = [-1.0f32, -0.25, 0.0, 0.4, 1.0];
        for &ax in &samples {
            for &ay in &samples {
                for &cx in &samples {
                    for &cy in &samples {
                        let angle = joint_angle(p(ax, ay), p(0.1, 0.2), p(cx, cy));
                        assert!(
                            (0.0..=180.0).contains(&angle),
                            "angle {} out of range for a=({},{}) c=({},{})",
                            angle,
                            ax,
                            ay,
                            cx,
                            cy
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_flexion_of_straight_joint() {
        // 完全伸直 (共线) → 屈曲角0°
        let flexion = flexion_angle(p(0.5, 0.3), p(0.5, 0.5), p(0.5, 0.7));
        assert!(flexion.abs() < 1e-4);
    }

    #[test]
    fn test_flexion_of_right_angle_joint() {
        let flexion = flexion_angle(p(1.0, 0.0), p(0.0, 0.0), p(0.0, 1.0));
        assert!((flexion - 90.0).abs() < 1e-4);
    }
}
