pub mod nll_loss;
