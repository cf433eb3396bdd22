use crate::autograd::graph::{Graph, NodeId};
use crate::error::TapegradError;
use crate::tensor::{zeros_like, Tensor};
use approx::relative_eq;
use thiserror::Error;

/// Error type specifically for gradient checking failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradCheckError {
    #[error("Gradient check failed for input {input_index}, element {element_index}: analytical {analytical} != numerical {numerical}")]
    GradientMismatch {
        input_index: usize,
        element_index: usize,
        analytical: f64,
        numerical: f64,
    },

    #[error("Numerical gradient is not finite for input {input_index}, element {element_index} (loss+ {loss_plus}, loss- {loss_minus})")]
    NumericalGradNotFinite {
        input_index: usize,
        element_index: usize,
        loss_plus: f64,
        loss_minus: f64,
    },

    #[error("Tensor error during gradient check: {0}")]
    TensorError(#[from] TapegradError),
}

/// Tolerances for [`check_grad`].
#[derive(Debug, Clone, Copy)]
pub struct GradCheckOptions {
    /// Finite-difference step.
    pub epsilon: f64,
    pub abs_tolerance: f64,
    pub rel_tolerance: f64,
}

impl Default for GradCheckOptions {
    fn default() -> Self {
        GradCheckOptions {
            epsilon: 1e-6,
            abs_tolerance: 1e-6,
            rel_tolerance: 1e-5,
        }
    }
}

/// Compares the engine's gradients with central finite differences.
///
/// `func` builds a scalar from the given input nodes. It is called once on a
/// recording graph to obtain analytical gradients, then twice per input element
/// on inference graphs with that element nudged by `±epsilon`.
pub fn check_grad<F>(func: F, inputs: &[Tensor], options: GradCheckOptions) -> Result<(), GradCheckError>
where
    F: Fn(&mut Graph, &[NodeId]) -> Result<NodeId, TapegradError>,
{
    let mut graph = Graph::new();
    let ids: Vec<NodeId> = inputs.iter().map(|t| graph.leaf(t.clone(), true)).collect();
    let output = func(&mut graph, &ids)?;
    graph.backward(output)?;
    let analytical: Vec<Tensor> = ids
        .iter()
        .zip(inputs)
        .map(|(&id, input)| {
            graph
                .grad(id)
                .map(|g| g.cloned().unwrap_or_else(|| zeros_like(input)))
        })
        .collect::<Result<_, _>>()?;

    let evaluate = |perturbed: &[Tensor]| -> Result<f64, TapegradError> {
        let mut graph = Graph::inference();
        let ids: Vec<NodeId> = perturbed.iter().map(|t| graph.input(t.clone())).collect();
        let output = func(&mut graph, &ids)?;
        graph.value(output)?.item()
    };

    let mut perturbed = inputs.to_vec();
    for (input_index, input) in inputs.iter().enumerate() {
        for element_index in 0..input.numel() {
            let original = input.data()[element_index];

            perturbed[input_index].data_mut()[element_index] = original + options.epsilon;
            let loss_plus = evaluate(&perturbed)?;
            perturbed[input_index].data_mut()[element_index] = original - options.epsilon;
            let loss_minus = evaluate(&perturbed)?;
            perturbed[input_index].data_mut()[element_index] = original;

            let numerical = (loss_plus - loss_minus) / (2.0 * options.epsilon);
            if !numerical.is_finite() {
                return Err(GradCheckError::NumericalGradNotFinite {
                    input_index,
                    element_index,
                    loss_plus,
                    loss_minus,
                });
            }
            let analytical = analytical[input_index].data()[element_index];
            if !relative_eq!(
                analytical,
                numerical,
                epsilon = options.abs_tolerance,
                max_relative = options.rel_tolerance
            ) {
                return Err(GradCheckError::GradientMismatch {
                    input_index,
                    element_index,
                    analytical,
                    numerical,
                });
            }
        }
    }
    Ok(())
}
