mod assess;
mod extraction;
mod fallback;
mod properties;
mod scoring;
