//! Backend selection

use kinetic_core::KineticResult;
use kinetic_mapper::CoordinateMapper;

use crate::{EngineConfig, EngineCore, FrameSourceHandle, FrameStateEngine, LegacyEngine, ModernEngine};

/// Hardware generation detected at session start
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorGeneration {
    Modern,
    Legacy,
}

/// Engine for one session; the variant never changes after construction
#[derive(Debug)]
pub enum SensorEngine {
    Modern(ModernEngine),
    Legacy(LegacyEngine),
}

impl SensorEngine {
    pub fn new(
        generation: SensorGeneration,
        config: EngineConfig,
        mapper: Box<dyn CoordinateMapper>,
    ) -> Self {
        tracing::debug!(?generation, "creating frame state engine");
        match generation {
            SensorGeneration::Modern => SensorEngine::Modern(ModernEngine::new(config, mapper)),
            SensorGeneration::Legacy => SensorEngine::Legacy(LegacyEngine::new(config, mapper)),
        }
    }

    pub fn generation(&self) -> SensorGeneration {
        match self {
            SensorEngine::Modern(_) => SensorGeneration::Modern,
            SensorEngine::Legacy(_) => SensorGeneration::Legacy,
        }
    }
}

impl FrameStateEngine for SensorEngine {
    fn core(&self) -> &EngineCore {
        match self {
            SensorEngine::Modern(engine) => engine.core(),
            SensorEngine::Legacy(engine) => engine.core(),
        }
    }

    fn core_mut(&mut self) -> &mut EngineCore {
        match self {
            SensorEngine::Modern(engine) => engine.core_mut(),
            SensorEngine::Legacy(engine) => engine.core_mut(),
        }
    }

    fn is_legacy(&self) -> bool {
        matches!(self, SensorEngine::Legacy(_))
    }

    fn update(&mut self, source: FrameSourceHandle<'_>) -> KineticResult<bool> {
        match self {
            SensorEngine::Modern(engine) => engine.update(source),
            SensorEngine::Legacy(engine) => engine.update(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kinetic_mapper::PinholeMapper;

    #[test]
    fn test_variant_follows_generation() {
        let engine = SensorEngine::new(
            SensorGeneration::Legacy,
            EngineConfig::default(),
            Box::new(PinholeMapper::modern()),
        );
        assert!(engine.is_legacy());
        assert_eq!(engine.generation(), SensorGeneration::Legacy);

        let engine = SensorEngine::new(
            SensorGeneration::Modern,
            EngineConfig::default(),
            Box::new(PinholeMapper::modern()),
        );
        assert!(!engine.is_legacy());
    }

    #[test]
    fn test_render_before_start_is_safe() {
        let mut engine = SensorEngine::new(
            SensorGeneration::Modern,
            EngineConfig::default(),
            Box::new(PinholeMapper::modern()),
        );
        let mut target = kinetic_visual::NullTarget;
        assert!(engine.render(&mut target).is_empty());
        assert!(engine.depth_image().is_empty());
        assert_eq!(engine.depth_samples().count(), 0);
        assert_eq!(engine.active_player(), None);
    }
}
