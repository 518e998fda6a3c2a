use pyo3::exceptions::{PyRuntimeError, PyTypeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::{PyFloat, PyFrozenSet, PyLong};

use crate::{
    error::Error,
    lcm::{Lcm, LcmParams},
    support::MinSupport,
    types::{Itemset, Token},
};

macro_rules! pyfrozenset {
    ($py:expr, $itemset:expr) => {{
        let items: Vec<&Token> = $itemset.iter().collect();
        let set: Py<PyFrozenSet> = PyFrozenSet::new($py, &items)?.into();
        set
    }};
}

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        match err {
            Error::Worker { .. } => PyRuntimeError::new_err(err.to_string()),
            _ => PyValueError::new_err(err.to_string()),
        }
    }
}

impl ToPyObject for Token {
    fn to_object(&self, py: Python) -> PyObject {
        match self {
            Token::Int(i) => i.to_object(py),
            Token::Str(s) => s.to_object(py),
        }
    }
}

impl<'source> FromPyObject<'source> for Token {
    fn extract(ob: &'source PyAny) -> PyResult<Self> {
        if ob.is_instance::<PyLong>()? {
            Ok(Token::Int(ob.extract()?))
        } else if let Ok(s) = ob.extract::<String>() {
            Ok(Token::Str(s))
        } else {
            Err(PyTypeError::new_err(format!(
                "items must be int or str, got {}",
                ob.get_type().name()?
            )))
        }
    }
}

fn min_supp_from_py(min_supp: Option<&PyAny>) -> PyResult<MinSupport> {
    match min_supp {
        None => Ok(MinSupport::default()),
        Some(value) if value.is_instance::<PyFloat>()? => Ok(MinSupport::Relative(value.extract()?)),
        Some(value) if value.is_instance::<PyLong>()? => Ok(MinSupport::Absolute(value.extract()?)),
        Some(_) => Err(PyTypeError::new_err(
            "minimum support must be of type int or float",
        )),
    }
}

fn transactions_from_py(data: &PyAny) -> PyResult<Vec<Vec<Token>>> {
    data.iter()?
        .map(|transaction| {
            transaction?
                .iter()?
                .map(|item| item?.extract::<Token>())
                .collect::<PyResult<Vec<Token>>>()
        })
        .collect()
}

/// Linear time Closed itemset Miner.
#[pyclass(name = "LCM")]
pub struct PyLcm {
    inner: Lcm<Token>,
}

#[pymethods]
impl PyLcm {
    #[new]
    #[args("*", min_supp = "None", n_jobs = "1")]
    fn new(min_supp: Option<&PyAny>, n_jobs: i64) -> PyResult<Self> {
        let params = LcmParams {
            min_supp: min_supp_from_py(min_supp)?,
            n_jobs: LcmParams::checked_jobs(n_jobs)?,
        };
        Ok(PyLcm {
            inner: Lcm::new(params)?,
        })
    }

    #[getter]
    fn n_transactions(&self) -> usize {
        self.inner.n_transactions()
    }

    fn fit<'py>(mut slf: PyRefMut<'py, Self>, data: &PyAny) -> PyResult<PyRefMut<'py, Self>> {
        let transactions = transactions_from_py(data)?;
        slf.inner.fit(transactions)?;
        Ok(slf)
    }

    /// Returns `(itemset, support)` pairs, or `(itemset, tids)` with `return_tids`.
    #[args(return_tids = "false")]
    fn fit_discover(
        &mut self,
        py: Python,
        data: &PyAny,
        return_tids: bool,
    ) -> PyResult<Vec<(Py<PyFrozenSet>, PyObject)>> {
        let transactions = transactions_from_py(data)?;
        let patterns = py.allow_threads(|| self.inner.discover_tids(transactions))?;

        let mut result = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let value = if return_tids {
                pattern.tids.iter().collect::<Vec<u32>>().into_py(py)
            } else {
                pattern.support().into_py(py)
            };
            result.push((pyfrozenset![py, pattern.itemset], value));
        }
        Ok(result)
    }

    /// Returns the itemset column labels and the transaction x itemset 0/1 rows.
    #[args(sort = "true")]
    fn fit_transform(
        &mut self,
        py: Python,
        data: &PyAny,
        sort: bool,
    ) -> PyResult<(Vec<Py<PyFrozenSet>>, Vec<Vec<u8>>)> {
        let transactions = transactions_from_py(data)?;
        let matrix = py.allow_threads(|| self.inner.transform(transactions, sort))?;

        let columns = matrix
            .columns()
            .iter()
            .map(|itemset: &Itemset<Token>| Ok(pyfrozenset![py, itemset]))
            .collect::<PyResult<_>>()?;
        Ok((columns, matrix.to_dense()))
    }
}

#[pymodule]
fn lcm(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<PyLcm>()?;
    Ok(())
}
