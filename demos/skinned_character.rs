use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec3};
use sinew::animation::clip::AnimationClip;
use sinew::animation::curve::{Curve, InterpolationMode, KeyframeCurve};
use sinew::model::ModelBone;
use sinew::skinning::SkinnedAnimation;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // A little three-bone character: pelvis at the origin, spine one unit
    // up, head one unit above that. The first record is the loader's
    // synthetic scene root and never becomes a bone.
    let model = vec![
        ModelBone::synthetic_root("Scene"),
        ModelBone::new("Pelvis", Mat4::IDENTITY, Some(0)),
        ModelBone::new("Spine", Mat4::from_translation(Vec3::Y), Some(1)),
        ModelBone::new("Head", Mat4::from_translation(Vec3::Y), Some(2)),
    ];

    let mut animation = SkinnedAnimation::new(&model)?;
    println!("Skeleton ready: {} bones", animation.skeleton().len());

    // One clip driving all three bones through the three curve shapes:
    // a whole-vector bounce on the pelvis, a quaternion lean on the spine
    // and a single scalar lane nudging the head sideways.
    let mut clip = AnimationClip::new("bounce");
    clip.add_curve(
        "Pelvis/Pelvis:LocalPosition",
        Curve::Vector3(KeyframeCurve::new(
            vec![0.0, 0.5, 1.0],
            vec![Vec3::ZERO, Vec3::new(0.0, 0.25, 0.0), Vec3::ZERO],
            InterpolationMode::Linear,
        )),
    );
    clip.add_curve(
        "Pelvis/Spine/Spine:LocalRotation",
        Curve::Quaternion(KeyframeCurve::new(
            vec![0.0, 1.0],
            vec![Quat::IDENTITY, Quat::from_rotation_z(FRAC_PI_2 * 0.5)],
            InterpolationMode::Linear,
        )),
    );
    clip.add_curve(
        "Pelvis/Spine/Head/Head:LocalPosition.x",
        Curve::Scalar(KeyframeCurve::new(
            vec![0.0, 1.0],
            vec![0.0, 0.1],
            InterpolationMode::Linear,
        )),
    );

    animation.add_clip(clip)?;
    animation.play("bounce");

    if let Some(clip) = animation.player().active_clip() {
        println!(
            "Playing animation: {} (duration: {:.2}s)",
            clip.name,
            clip.duration()
        );
    }

    // Step a handful of frames and watch the head's skin matrix move.
    let dt = 1.0 / 60.0;
    for frame in 0..8 {
        animation.update(dt);

        let head = animation.skin_transforms()[2].w_axis.truncate();
        println!(
            "frame {frame}: head skin offset ({:+.3}, {:+.3}, {:+.3})",
            head.x, head.y, head.z
        );
    }

    // Freezing into the bind pose collapses every skin matrix to identity.
    animation.bind_posed = true;
    animation.update(dt);
    let head = animation.skin_transforms()[2].w_axis.truncate();
    println!(
        "bind pose: head skin offset ({:+.3}, {:+.3}, {:+.3})",
        head.x, head.y, head.z
    );

    Ok(())
}
