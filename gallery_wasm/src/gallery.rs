use crate::log::{console_log, console_warn};
use bubble_core::{BubbleSimulator, Config, ConfigError, IngestReport, Params, Viewport};
use gift_proto::{flags_of, Frame, GiftList, ProtoError};

/// Instance data handed to the renderer, four floats per bubble
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BubbleInstance {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub flags: f32, // FLAG_* bits as a float so the whole buffer is one Float32Array
}

/// Gallery page state: the simulation plus the "new gift" highlight timer
pub struct Gallery {
    sim: BubbleSimulator,
    highlight_until: Option<f64>, // ms, host clock
}

impl Gallery {
    pub fn new(width: f32, height: f32, seed: u64, config: Config) -> Result<Self, ConfigError> {
        let viewport = Viewport::new(width, height)?;
        Ok(Self {
            sim: BubbleSimulator::new(viewport, config, seed)?,
            highlight_until: None,
        })
    }

    /// Feed a fresh gift list. New gifts restart the highlight window.
    pub fn ingest(&mut self, list: &GiftList, now_ms: f64) -> IngestReport {
        let report = self.sim.add_bodies(&list.gifts);
        if report.is_empty() {
            return report;
        }

        if !report.spawned.is_empty() {
            self.highlight_until = Some(now_ms + Params::NEW_HIGHLIGHT_MS);
            console_log!(
                "Gallery: {} new gift(s), {} on screen",
                report.spawned.len(),
                self.sim.len()
            );
        }
        for err in &report.rejected {
            console_warn!("Gallery: skipped gift: {}", err);
        }

        report
    }

    /// Parse a `GET /api/gifts` response body and ingest it
    pub fn ingest_json(&mut self, json: &str, now_ms: f64) -> Result<IngestReport, ProtoError> {
        let list = GiftList::from_json(json)?;
        Ok(self.ingest(&list, now_ms))
    }

    /// Advance one animation frame
    pub fn frame(&mut self, now_ms: f64) {
        if let Some(deadline) = self.highlight_until {
            if now_ms >= deadline {
                self.sim.clear_new_flags();
                self.highlight_until = None;
            }
        }

        self.sim.tick();
    }

    pub fn resize(&mut self, width: f32, height: f32) -> Result<(), ConfigError> {
        self.sim.resize(width, height)?;
        console_log!("Gallery: viewport {}x{}", width, height);
        Ok(())
    }

    pub fn instances(&self) -> Vec<BubbleInstance> {
        self.sim
            .bodies()
            .iter()
            .map(|body| BubbleInstance {
                x: body.pos.x,
                y: body.pos.y,
                size: body.size,
                flags: flags_of(body) as f32,
            })
            .collect()
    }

    /// Gift ids in the same order as [`Self::instances`]
    pub fn ids(&self) -> Vec<String> {
        self.sim.bodies().into_iter().map(|body| body.id).collect()
    }

    pub fn snapshot_frame(&self) -> Frame {
        Frame::from_snapshots(self.sim.ticks(), &self.sim.bodies())
    }

    pub fn simulator(&self) -> &BubbleSimulator {
        &self.sim
    }
}

/// View instances as the flat float buffer the renderer uploads
pub fn instance_floats(instances: &[BubbleInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gift_proto::{FLAG_EXCHANGED, FLAG_NEW};

    const TWO_GIFTS: &str = r#"{"gifts": [{"id": 1}, {"id": 2, "is_exchanged": true}]}"#;
    const THREE_GIFTS: &str = r#"{"gifts": [{"id": 1}, {"id": 2}, {"id": 3}]}"#;

    fn gallery() -> Gallery {
        Gallery::new(1280.0, 720.0, 11, Config::new()).unwrap()
    }

    #[test]
    fn test_highlight_expires_after_window() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 1_000.0).unwrap();

        gallery.frame(2_000.0);
        assert!(gallery.simulator().bodies().iter().all(|b| b.is_new));

        gallery.frame(1_000.0 + Params::NEW_HIGHLIGHT_MS);
        assert!(gallery.simulator().bodies().iter().all(|b| !b.is_new));
    }

    #[test]
    fn test_new_batch_restarts_highlight() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 0.0).unwrap();
        gallery.frame(Params::NEW_HIGHLIGHT_MS);

        let report = gallery.ingest_json(THREE_GIFTS, 10_000.0).unwrap();
        assert_eq!(report.spawned, vec!["3".to_string()]);

        gallery.frame(11_000.0);
        assert!(gallery.simulator().body("3").unwrap().is_new);
        assert!(!gallery.simulator().body("1").unwrap().is_new);
    }

    #[test]
    fn test_refresh_without_new_gifts_keeps_timer() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 0.0).unwrap();
        // Same list again, later: must not extend the window
        gallery.ingest_json(TWO_GIFTS, 2_500.0).unwrap();

        gallery.frame(Params::NEW_HIGHLIGHT_MS);
        assert!(gallery.simulator().bodies().iter().all(|b| !b.is_new));
    }

    #[test]
    fn test_bad_id_does_not_block_the_batch() {
        let mut gallery = gallery();
        let report = gallery
            .ingest_json(r#"{"gifts":[{"id":1},{"id":2.5},{"id":3}]}"#, 0.0)
            .unwrap();

        assert_eq!(report.spawned, vec!["1".to_string(), "3".to_string()]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(gallery.simulator().len(), 2);
    }

    #[test]
    fn test_repeat_poll_reports_nothing() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 0.0).unwrap();
        let report = gallery.ingest_json(TWO_GIFTS, 3_000.0).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let mut gallery = gallery();
        assert!(gallery.ingest_json("not json", 0.0).is_err());
        assert!(gallery.simulator().is_empty());
    }

    #[test]
    fn test_instances_pack_flags_and_order() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 0.0).unwrap();

        let instances = gallery.instances();
        assert_eq!(gallery.ids(), vec!["1".to_string(), "2".to_string()]);
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].flags, FLAG_NEW as f32);
        assert_eq!(instances[1].flags, (FLAG_NEW | FLAG_EXCHANGED) as f32);

        let floats = instance_floats(&instances);
        assert_eq!(floats.len(), 8);
        assert_eq!(floats[0], instances[0].x);
        assert_eq!(floats[6], instances[1].size);
    }

    #[test]
    fn test_snapshot_frame_tracks_ticks() {
        let mut gallery = gallery();
        gallery.ingest_json(TWO_GIFTS, 0.0).unwrap();
        gallery.frame(16.0);
        gallery.frame(32.0);

        let frame = gallery.snapshot_frame();
        assert_eq!(frame.tick, 2);
        assert_eq!(frame.bubbles.len(), 2);
    }

    #[test]
    fn test_resize_rejects_empty_viewport() {
        let mut gallery = gallery();
        assert!(gallery.resize(0.0, 720.0).is_err());
        assert!(gallery.resize(640.0, 480.0).is_ok());
        assert_eq!(gallery.simulator().viewport().width, 640.0);
    }
}
