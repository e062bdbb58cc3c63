//! Sensor detection and device handles

use kinetic_core::{FaceFrameFeatures, FrameSourceTypes, KineticResult};
use kinetic_mapper::{CoordinateMapper, LegacyColorFormat, LegacyDepthFormat, PinholeMapper};
use kinetic_state::{FaceReader, FrameSourceHandle, LegacySensor, MultiSourceReader, SensorGeneration};

/// Opened sensor streams for one session
pub enum DeviceHandles {
    Modern {
        reader: Box<dyn MultiSourceReader>,
        faces: Option<Box<dyn FaceReader>>,
    },
    Legacy {
        sensor: Box<dyn LegacySensor>,
    },
}

impl DeviceHandles {
    pub fn generation(&self) -> SensorGeneration {
        match self {
            DeviceHandles::Modern { .. } => SensorGeneration::Modern,
            DeviceHandles::Legacy { .. } => SensorGeneration::Legacy,
        }
    }

    /// Borrow the handles for one engine update
    pub fn frame_source(&mut self) -> FrameSourceHandle<'_> {
        match self {
            DeviceHandles::Modern { reader, faces } => FrameSourceHandle::Modern {
                reader: reader.as_mut(),
                faces: match faces {
                    Some(faces) => Some(faces.as_mut()),
                    None => None,
                },
            },
            DeviceHandles::Legacy { sensor } => FrameSourceHandle::Legacy(sensor.as_mut()),
        }
    }

    pub fn face_reader_mut(&mut self) -> Option<&mut dyn FaceReader> {
        match self {
            DeviceHandles::Modern {
                faces: Some(faces), ..
            } => Some(faces.as_mut()),
            _ => None,
        }
    }
}

impl std::fmt::Debug for DeviceHandles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceHandles::Modern { faces, .. } => f
                .debug_struct("Modern")
                .field("faces", &faces.is_some())
                .finish(),
            DeviceHandles::Legacy { .. } => f.debug_struct("Legacy").finish(),
        }
    }
}

/// Driver-side discovery
pub trait DeviceProbe {
    /// Whether a first-generation sensor is plugged in
    fn legacy_sensor_attached(&self) -> bool;

    /// Open the multiplexed reader, plus a face reader when `face_features` is not empty
    fn open_modern(
        &mut self,
        sources: FrameSourceTypes,
        face_features: FaceFrameFeatures,
    ) -> KineticResult<DeviceHandles>;

    /// Open a legacy sensor with color, depth and skeleton streams enabled
    fn open_legacy(&mut self) -> KineticResult<DeviceHandles>;
}

/// Backend choice made once at session start
pub struct DeviceSelection;

impl DeviceSelection {
    pub fn detect(probe: &dyn DeviceProbe) -> SensorGeneration {
        let generation = if probe.legacy_sensor_attached() {
            SensorGeneration::Legacy
        } else {
            SensorGeneration::Modern
        };
        tracing::debug!(?generation, "sensor generation detected");
        generation
    }

    pub fn open(
        probe: &mut dyn DeviceProbe,
        generation: SensorGeneration,
        sources: FrameSourceTypes,
        face_features: FaceFrameFeatures,
    ) -> KineticResult<DeviceHandles> {
        match generation {
            SensorGeneration::Modern => probe.open_modern(sources, face_features),
            SensorGeneration::Legacy => probe.open_legacy(),
        }
    }

    /// Factory-calibrated mapper for the generation
    pub fn mapper(generation: SensorGeneration) -> Box<dyn CoordinateMapper> {
        match generation {
            SensorGeneration::Modern => Box::new(PinholeMapper::modern()),
            SensorGeneration::Legacy => Box::new(PinholeMapper::legacy(
                LegacyDepthFormat::default(),
                LegacyColorFormat::default(),
            )),
        }
    }
}
