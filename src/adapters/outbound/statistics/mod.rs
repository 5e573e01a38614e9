/// Statistics adapters
mod counting_statistics_provider;

pub use counting_statistics_provider::CountingStatisticsProvider;
