//! Chart Controller
//!
//! Per-slot selection state and the chart's current render. Changing the
//! sensors or the chart type tears the render down and rebuilds it from a
//! fresh configuration; changing only the color patches the existing render
//! in place.

use crate::chart::{
    ChartColor, ChartConfigBuilder, ChartConfiguration, ChartSelection, ChartType, Palette,
};
use crate::config::DashboardConfig;
use crate::error::{DashboardError, DashboardResult};
use crate::sensors::{SensorData, SensorType};

use super::controller::ChartSlotId;

/// A built chart: its configuration and which rebuild produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRender {
    pub config: ChartConfiguration,
    /// Incremented on every full rebuild, unchanged by recolors
    pub generation: u64,
}

/// What the view has to do after a selection change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderCommand {
    /// Discard the current drawing and draw render `generation` from scratch
    Rebuild { generation: u64 },
    /// Repaint the existing drawing in a new color
    Recolor { hex: String },
}

/// Selection state and render of one chart slot
#[derive(Debug, Clone)]
pub struct ChartController {
    id: ChartSlotId,
    builder: ChartConfigBuilder,
    palette: Palette,
    selection: ChartSelection,
    render: Option<ChartRender>,
    generation: u64,
}

impl ChartController {
    /// Controller with default selection and rendering parameters
    pub fn new(id: ChartSlotId) -> Self {
        Self::with_config(id, &DashboardConfig::default())
    }

    /// Controller using the palette and rendering parameters of `config`
    pub fn with_config(id: ChartSlotId, config: &DashboardConfig) -> Self {
        let palette = config.palette();
        Self {
            id,
            builder: config.chart_builder(),
            selection: ChartSelection::with_palette(&palette),
            palette,
            render: None,
            generation: 0,
        }
    }

    pub fn id(&self) -> &ChartSlotId {
        &self.id
    }

    pub fn selection(&self) -> &ChartSelection {
        &self.selection
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Current render, if the chart has been drawn
    pub fn current(&self) -> Option<&ChartRender> {
        self.render.as_ref()
    }

    /// Tear down any existing render and build a fresh one
    pub fn render(&mut self, data: &SensorData) -> DashboardResult<RenderCommand> {
        let config = self.builder.build(data, &self.selection)?;
        self.generation += 1;
        self.render = Some(ChartRender {
            config,
            generation: self.generation,
        });

        tracing::debug!("{} rebuilt (generation {})", self.id, self.generation);
        Ok(RenderCommand::Rebuild {
            generation: self.generation,
        })
    }

    /// Replace the plotted sensors and rebuild
    ///
    /// An empty list is rejected; selection and render stay as they were.
    /// Duplicates are dropped, keeping first occurrence order.
    pub fn set_sensors(
        &mut self,
        sensors: &[SensorType],
        data: &SensorData,
    ) -> DashboardResult<RenderCommand> {
        if sensors.is_empty() {
            tracing::warn!("{}: refusing to clear the sensor selection", self.id);
            return Err(DashboardError::EmptySelection);
        }

        let mut unique = Vec::with_capacity(sensors.len());
        for sensor in sensors {
            if !unique.contains(sensor) {
                unique.push(*sensor);
            }
        }

        self.selection.sensors = unique;
        self.render(data)
    }

    /// Add or remove one sensor from the selection and rebuild
    pub fn toggle_sensor(
        &mut self,
        sensor: SensorType,
        data: &SensorData,
    ) -> DashboardResult<RenderCommand> {
        let mut sensors = self.selection.sensors.clone();
        match sensors.iter().position(|s| *s == sensor) {
            Some(idx) => {
                sensors.remove(idx);
            }
            None => sensors.push(sensor),
        }
        self.set_sensors(&sensors, data)
    }

    /// Change the chart type and rebuild
    pub fn set_chart_type(
        &mut self,
        chart_type: ChartType,
        data: &SensorData,
    ) -> DashboardResult<RenderCommand> {
        self.selection.chart_type = chart_type;
        self.render(data)
    }

    /// Change the color, patching the current render in place
    pub fn set_color(&mut self, color: ChartColor) -> RenderCommand {
        if let Some(render) = self.render.as_mut() {
            render.config.set_color(&color.hex);
        }

        let hex = color.hex.clone();
        self.selection.color = color;
        RenderCommand::Recolor { hex }
    }

    /// Change the color by palette name or hex value
    pub fn set_color_by_key(&mut self, key: &str) -> DashboardResult<RenderCommand> {
        let color = self.palette.find(key)?;
        Ok(self.set_color(color))
    }

    /// Rebuild after the dashboard regenerated its sensor data
    pub fn on_data_regenerated(&mut self, data: &SensorData) -> DashboardResult<RenderCommand> {
        self.render(data)
    }
}
