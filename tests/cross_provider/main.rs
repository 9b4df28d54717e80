mod generation_e2e;
mod providers;
