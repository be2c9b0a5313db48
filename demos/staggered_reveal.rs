use std::cell::RefCell;
use std::rc::Rc;

use scrubline::{
    At, Ease, Host, PropertyKind, RecordingSink, Rect, SceneDef, ScrollScene, Size, StaticLayout,
    StepDef, TimelineDef, TriggerDef, Viewport,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let words = ["scroll", "drives", "every", "frame"];
    let mut scene = SceneDef::new(TriggerDef::new("headline"));
    scene.segments = Some(words.len());
    scene.timeline = TimelineDef {
        steps: words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                StepDef::new(format!("word-{w}"), PropertyKind::Opacity, 0.0, 1.0)
                    .at(At::Absolute(i as f64 * 0.2))
                    .duration(0.25)
                    .ease(Ease::OutCubic)
            })
            .collect(),
    };

    let layout = Rc::new(
        StaticLayout::new(Size::new(1280.0, 800.0))
            .with("headline", Rect::new(0.0, 400.0, 1280.0, 2000.0)),
    );
    let host = Host::new(Viewport::new(layout.viewport.width, layout.viewport.height));
    let sink = Rc::new(RefCell::new(RecordingSink::new()));
    let mounted = ScrollScene::mount(scene, &host, Rc::clone(&layout), Rc::clone(&sink))?;
    mounted.on_segment_change(|change| {
        println!("segment {:?} -> {} ({:?})", change.previous, change.index, change.direction);
    });

    for offset in (0..=2400).step_by(200) {
        host.queue_scroll(offset as f64);
        host.frame();
        let frame = mounted.frame();
        println!(
            "scroll={:>5.0} progress={:.3} writes={}",
            frame.scroll, frame.progress, frame.commit.written
        );
    }

    mounted.unmount();
    println!(
        "unmounted: listeners={} residual_overrides={}",
        host.listener_count(),
        sink.borrow().residual_overrides()
    );
    Ok(())
}
