use crate::autograd::{Graph, NodeId};
use crate::error::TapegradError;
use crate::nn::Module;
use crate::optim::{LrScheduler, Optimizer, Sgd, SgdOptions, StepLr};
use crate::tensor::Tensor;
use crate::train::batch::{Batch, BatchSource};
use crate::train::config::{LossKind, TrainConfig};

/// Summary of one training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean of the per-batch losses.
    pub mean_loss: f64,
    pub batches: usize,
}

/// Result of [`Trainer::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Loss averaged over samples (not batches).
    pub mean_loss: f64,
    /// Fraction of samples whose highest-scoring class matches the label.
    pub accuracy: f64,
    pub samples: usize,
}

/// Owns a model and an SGD optimizer over its parameters and runs the
/// forward → zero_grad → backward → step cycle.
#[derive(Debug)]
pub struct Trainer<M: Module> {
    model: M,
    optimizer: Sgd,
    scheduler: Option<StepLr>,
    config: TrainConfig,
}

impl<M: Module> Trainer<M> {
    /// # Errors
    /// `InvalidConfig` if `config` does not validate.
    pub fn new(model: M, config: TrainConfig) -> Result<Self, TapegradError> {
        config.validate()?;
        let optimizer = Sgd::with_options(
            model.parameters(),
            SgdOptions {
                lr: config.learning_rate,
                momentum: config.momentum,
                weight_decay: config.weight_decay,
            },
        )?;
        let scheduler = match config.lr_step {
            Some((step_size, gamma)) => Some(StepLr::new(config.learning_rate, step_size, gamma)?),
            None => None,
        };
        Ok(Trainer {
            model,
            optimizer,
            scheduler,
            config,
        })
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn optimizer(&self) -> &Sgd {
        &self.optimizer
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Runs one optimisation step on `batch` and returns its loss.
    ///
    /// Order: forward, loss, `zero_grad`, backward, `step`.
    pub fn train_step(&mut self, batch: &Batch) -> Result<f64, TapegradError> {
        let mut graph = Graph::new();
        let loss = self.forward_loss(&mut graph, batch)?;
        let loss_value = graph.value(loss)?.item()?;

        self.optimizer.zero_grad();
        graph.backward(loss)?;
        self.optimizer.step()?;
        Ok(loss_value)
    }

    /// Trains for `config.epochs` epochs, restarting `source` every epoch.
    ///
    /// The first error aborts the run and is returned.
    pub fn fit<S>(&mut self, source: &mut S) -> Result<Vec<EpochReport>, TapegradError>
    where
        S: BatchSource + ?Sized,
    {
        let mut reports = Vec::with_capacity(self.config.epochs);
        for epoch in 1..=self.config.epochs {
            let mut total = 0.0;
            let mut batches = 0;
            for batch in source.batches() {
                total += self.train_step(&batch?)?;
                batches += 1;
            }
            if batches == 0 {
                return Err(TapegradError::EmptyBatch {
                    operation: "fit".to_string(),
                });
            }
            let report = EpochReport {
                epoch,
                mean_loss: total / batches as f64,
                batches,
            };
            if self.config.log_every > 0 && epoch % self.config.log_every == 0 {
                log::info!(
                    "epoch {}/{}: mean loss {:.6} over {} batches (lr {})",
                    epoch,
                    self.config.epochs,
                    report.mean_loss,
                    batches,
                    self.optimizer.learning_rate()
                );
            } else {
                log::debug!("epoch {}: mean loss {:.6}", epoch, report.mean_loss);
            }
            reports.push(report);

            if let Some(scheduler) = self.scheduler.as_mut() {
                scheduler.step(&mut self.optimizer);
            }
        }
        Ok(reports)
    }

    /// Mean loss and accuracy over `source` without recording any graph.
    ///
    /// # Errors
    /// `EmptyBatch` if `source` yields no samples.
    pub fn evaluate<S>(&self, source: &mut S) -> Result<Evaluation, TapegradError>
    where
        S: BatchSource + ?Sized,
    {
        let mut loss_sum = 0.0;
        let mut correct = 0;
        let mut samples = 0;
        for batch in source.batches() {
            let batch = batch?;
            let mut graph = Graph::inference();
            let input = graph.input(batch.inputs.clone());
            let flat = graph.flatten(input)?;
            let output = self.model.forward(&mut graph, flat)?;
            let loss = self.loss(&mut graph, output, &batch.labels)?;

            loss_sum += graph.value(loss)?.item()? * batch.len() as f64;
            correct += graph
                .value(output)?
                .argmax_rows()
                .iter()
                .zip(&batch.labels)
                .filter(|(predicted, label)| predicted == label)
                .count();
            samples += batch.len();
        }
        if samples == 0 {
            return Err(TapegradError::EmptyBatch {
                operation: "evaluate".to_string(),
            });
        }
        Ok(Evaluation {
            mean_loss: loss_sum / samples as f64,
            accuracy: correct as f64 / samples as f64,
            samples,
        })
    }

    /// Class probabilities `[batch, classes]` for `inputs`, without recording.
    pub fn predict_proba(&self, inputs: &Tensor) -> Result<Tensor, TapegradError> {
        let mut graph = Graph::inference();
        let input = graph.input(inputs.clone());
        let flat = graph.flatten(input)?;
        let output = self.model.forward(&mut graph, flat)?;
        let log_probs = match self.config.loss {
            LossKind::CrossEntropy => graph.log_softmax(output)?,
            LossKind::Nll => output,
        };
        Ok(graph.value(log_probs)?.map(f64::exp))
    }

    fn forward_loss(&self, graph: &mut Graph, batch: &Batch) -> Result<NodeId, TapegradError> {
        let input = graph.input(batch.inputs.clone());
        let flat = graph.flatten(input)?;
        let output = self.model.forward(graph, flat)?;
        self.loss(graph, output, &batch.labels)
    }

    fn loss(
        &self,
        graph: &mut Graph,
        output: NodeId,
        labels: &[usize],
    ) -> Result<NodeId, TapegradError> {
        match self.config.loss {
            LossKind::CrossEntropy => graph.cross_entropy(output, labels),
            LossKind::Nll => graph.nll_loss(output, labels),
        }
    }
}

#[cfg(test)]
#[path = "trainer_test.rs"]
mod tests;
