//! One loaded price table serving any number of forecast requests

use crate::assembler::{assemble, ForecastResult, PlotPayload};
use crate::config::ForecastConfig;
use crate::data::{DataLoader, PriceTable};
use crate::error::Result;
use crate::models::arima::FittedArima;
use crate::models::TrainedForecastModel;
use crate::report::{ChartSpec, ForecastTable};
use crate::request::ForecastRequest;
use std::sync::Arc;
use tracing::info;

/// Everything the rendering layer needs for one request
#[derive(Debug, Clone)]
pub struct ForecastOutput {
    pub result: ForecastResult,
    pub plot: PlotPayload,
    pub table: ForecastTable,
    pub chart: ChartSpec,
}

/// Immutable handle over the loaded price table
///
/// Errors from [`ForecastSession::open`] end the session. Errors from
/// [`ForecastSession::generate`] only fail that request.
#[derive(Debug, Clone)]
pub struct ForecastSession {
    config: ForecastConfig,
    prices: Arc<PriceTable>,
}

impl ForecastSession {
    /// Load and validate the price table named by `config`
    pub fn open(config: ForecastConfig) -> Result<Self> {
        let prices = DataLoader::from_csv(&config.data_file)?;
        Ok(Self::with_prices(config, prices))
    }

    /// Wrap an already-loaded price table
    pub fn with_prices(config: ForecastConfig, prices: PriceTable) -> Self {
        Self {
            config,
            prices: Arc::new(prices),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Loaded price table
    pub fn prices(&self) -> &PriceTable {
        &self.prices
    }

    /// Tickers available for selection
    pub fn tickers(&self) -> Vec<&str> {
        self.prices.tickers()
    }

    /// Run one request against the model artifact named in the configuration
    ///
    /// The artifact is read on every call.
    pub fn generate(&self, request: &ForecastRequest) -> Result<ForecastOutput> {
        let model = FittedArima::from_json_file(&self.config.model_file)?;
        self.generate_with(request, &model)
    }

    /// Run one request against an explicit model
    pub fn generate_with<M>(&self, request: &ForecastRequest, model: &M) -> Result<ForecastOutput>
    where
        M: TrainedForecastModel + ?Sized,
    {
        let series = self.prices.select(&request.ticker)?;
        let result = assemble(&series, request.horizon_days(), model)?;
        let plot = PlotPayload::with_recent(&series, &result, self.config.recent_points);
        let table = ForecastTable::from_result(&result);
        let chart = ChartSpec::new(&result, &plot, self.config.recent_points);

        info!(
            ticker = %request.ticker,
            horizon = request.horizon_days(),
            model = model.name(),
            "Generated forecast"
        );

        Ok(ForecastOutput {
            result,
            plot,
            table,
            chart,
        })
    }
}
